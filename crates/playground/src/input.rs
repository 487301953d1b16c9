//! Handle all the input from the end user.
//!
//! Events arrive as JSON, one per line, for example:
//!
//! ```text
//! {"pointer_move":{"x":10.0,"y":20.0}}
//! {"click":{"x":10.0,"y":20.0}}
//! "toggle"
//! {"gravity":1.2}
//! ```

use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::run::Protocol;

/// The range of the gravity slider.
pub const GRAVITY_RANGE: (f32, f32) = (0.0, 2.0);

/// The range of the bounciness slider.
pub const RESTITUTION_RANGE: (f32, f32) = (0.0, 1.0);

/// Everything the user can do to a demo.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Input {
    /// The pointer moved over the surface.
    PointerMove {
        /// Logical x coordinate
        x: f32,
        /// Logical y coordinate
        y: f32,
    },
    /// A click, or tap, on the surface.
    Click {
        /// Logical x coordinate
        x: f32,
        /// Logical y coordinate
        y: f32,
    },
    /// Pause or resume the animation.
    Toggle,
    /// Remove everything from the demo.
    Clear,
    /// The gravity slider moved.
    Gravity(f32),
    /// The bounciness slider moved.
    Restitution(f32),
    /// The container changed size.
    Resize {
        /// Logical width
        width: f32,
        /// Logical height
        height: f32,
    },
    /// Stop the whole application.
    End,
}

impl Input {
    /// Parse a single line of input.
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(line.trim())?)
    }

    /// Keep slider values within what the sliders can actually produce. The simulations accept
    /// anything, so this is the only place that enforces the ranges.
    #[must_use]
    pub fn to_slider_range(self) -> Self {
        #[expect(
            clippy::wildcard_enum_match_arm,
            reason = "Only sliders have ranges"
        )]
        match self {
            Self::Gravity(gravity) => {
                Self::Gravity(gravity.clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1))
            }
            Self::Restitution(restitution) => {
                Self::Restitution(restitution.clamp(RESTITUTION_RANGE.0, RESTITUTION_RANGE.1))
            }
            other => other,
        }
    }
}

/// Start a thread to listen for lines of input and forward them to the rest of the
/// application.
pub fn start<R>(
    reader: R,
    protocol_tx: mpsc::Sender<Protocol>,
) -> std::thread::JoinHandle<Result<()>>
where
    R: std::io::BufRead + Send + 'static,
{
    // The Tokio docs actually suggest using `std::thread` to listen on STDIN.
    std::thread::spawn(move || -> Result<()> {
        let result = listen(reader, &protocol_tx);
        if let Err(error) = result {
            crate::run::send_protocol_end(&protocol_tx);
            return Err(error);
        }
        Ok(())
    })
}

/// Listen for lines of input. Lines that can't be parsed are logged and skipped. Reaching the
/// end of the input doesn't end the application, only an explicit `"end"` event does.
///
/// Sending waits for room in the channel, so no event is ever dropped however far ahead of the
/// render loop the input gets. This must not be called from inside the async runtime.
pub fn listen<R>(reader: R, protocol_tx: &mpsc::Sender<Protocol>) -> Result<()>
where
    R: std::io::BufRead,
{
    tracing::debug!("Starting to listen for input");

    for maybe_line in reader.lines() {
        let line = maybe_line?;
        if line.trim().is_empty() {
            continue;
        }

        let input = match Input::parse(&line) {
            Ok(input) => input,
            Err(error) => {
                tracing::error!("Couldn't parse input `{line}`: {error:?}");
                continue;
            }
        };
        tracing::trace!("Parsed input event: {input:?}");

        if matches!(input, Input::End) {
            crate::run::send_protocol_end(protocol_tx);
            break;
        }

        if protocol_tx.blocking_send(Protocol::Input(input)).is_err() {
            tracing::debug!("Nothing is listening for input any more");
            break;
        }
    }

    tracing::debug!("Leaving input listener");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_every_kind_of_event() {
        let cases = [
            (
                r#"{"pointer_move":{"x":1.0,"y":2.0}}"#,
                Input::PointerMove { x: 1.0, y: 2.0 },
            ),
            (r#"{"click":{"x":3,"y":4}}"#, Input::Click { x: 3.0, y: 4.0 }),
            (r#""toggle""#, Input::Toggle),
            (r#""clear""#, Input::Clear),
            (r#"{"gravity":0.5}"#, Input::Gravity(0.5)),
            (r#"{"restitution":0.8}"#, Input::Restitution(0.8)),
            (
                r#"{"resize":{"width":800,"height":600}}"#,
                Input::Resize {
                    width: 800.0,
                    height: 600.0,
                },
            ),
            (r#" "end" "#, Input::End),
        ];

        for (line, expected) in cases {
            assert_eq!(Input::parse(line).unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn bad_input() {
        assert!(Input::parse("jump").is_err());
        assert!(Input::parse(r#"{"click":{"x":1}}"#).is_err());
    }

    #[test]
    fn sliders_are_clamped() {
        assert_eq!(Input::Gravity(5.0).to_slider_range(), Input::Gravity(2.0));
        assert_eq!(Input::Gravity(-1.0).to_slider_range(), Input::Gravity(0.0));
        assert_eq!(
            Input::Restitution(1.5).to_slider_range(),
            Input::Restitution(1.0)
        );
        assert_eq!(Input::Toggle.to_slider_range(), Input::Toggle);
    }

    #[test]
    fn listener_forwards_events_and_skips_garbage() {
        let (protocol_tx, mut protocol_rx) = mpsc::channel(16);
        let source: &[u8] = b"\"toggle\"\nnonsense\n\n{\"gravity\":1.0}\n\"end\"\n\"clear\"\n";

        listen(source, &protocol_tx).unwrap();

        let mut received = Vec::new();
        while let Ok(message) = protocol_rx.try_recv() {
            received.push(message);
        }
        assert!(matches!(
            received.as_slice(),
            [
                Protocol::Input(Input::Toggle),
                Protocol::Input(Input::Gravity(_)),
                Protocol::End
            ]
        ));
    }

    #[test]
    fn listener_waits_for_room_instead_of_dropping() {
        let (protocol_tx, mut protocol_rx) = mpsc::channel(4);
        let lines: String = (0..500)
            .map(|index| format!("{{\"click\":{{\"x\":{index},\"y\":1}}}}\n"))
            .collect();
        let listener = std::thread::spawn(move || listen(lines.as_bytes(), &protocol_tx));

        let mut clicks = Vec::new();
        while let Some(message) = protocol_rx.blocking_recv() {
            if let Protocol::Input(Input::Click { x, .. }) = message {
                clicks.push(x);
            }
        }
        listener.join().unwrap().unwrap();

        let expected: Vec<f32> = (0_u16..500).map(f32::from).collect();
        assert_eq!(clicks, expected);
    }

    #[test]
    fn listener_stops_when_nobody_is_listening() {
        let (protocol_tx, protocol_rx) = mpsc::channel(4);
        drop(protocol_rx);
        let source: &[u8] = b"\"toggle\"\n\"clear\"\n";
        listen(source, &protocol_tx).unwrap();
    }
}
