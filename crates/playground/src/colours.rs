//! The fixed palette that every demo draws its colours from.

use palette::Srgb;
use rand::seq::SliceRandom as _;

/// An sRGB colour, without alpha. Alpha is decided at draw time.
pub type Colour = Srgb<f32>;

/// Pure white, used for highlights.
pub const WHITE: Colour = Srgb::new(1.0, 1.0, 1.0);

/// The 6 colours of the playground.
pub const PALETTE: [Srgb<u8>; 6] = [
    // Purple
    Srgb::new(0x8b, 0x5c, 0xf6),
    // Cyan
    Srgb::new(0x06, 0xb6, 0xd4),
    // Orange
    Srgb::new(0xf5, 0x9e, 0x0b),
    // Green
    Srgb::new(0x10, 0xb9, 0x81),
    // Red
    Srgb::new(0xef, 0x44, 0x44),
    // Blue
    Srgb::new(0x3b, 0x82, 0xf6),
];

/// Pick a random colour from the palette.
pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Colour {
    PALETTE
        .choose(rng)
        .map_or(WHITE, |colour| colour.into_format::<f32>())
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng as _;

    #[test]
    fn palette_matches_hex_codes() {
        let hex_codes = ["#8b5cf6", "#06b6d4", "#f59e0b", "#10b981", "#ef4444", "#3b82f6"];
        for (hex, colour) in hex_codes.iter().zip(PALETTE) {
            let parsed: Srgb<u8> = hex.parse().unwrap();
            assert_eq!(parsed, colour);
        }
    }

    #[test]
    fn random_colours_come_from_the_palette() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let choices: Vec<Colour> = PALETTE.iter().map(|colour| colour.into_format()).collect();
        for _ in 0..50 {
            assert!(choices.contains(&random(&mut rng)));
        }
    }
}
