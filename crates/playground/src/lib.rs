//! Interactive particle and ball physics demos, rendered to a raster surface.

pub mod cli_args;
pub mod colours;
/// All the user-configurable settings.
pub mod config {
    pub mod main;
}
pub mod input;
pub mod maths;
pub mod playground;
/// Driving demos one frame at a time.
pub mod render_loop {
    pub mod clock;
    pub mod driver;
    pub mod scheduler;
}
pub mod run;
pub mod surface;
pub mod utils;

/// This is where all the various demos are kept
pub mod demos {
    pub mod index;

    /// Embers and click explosions
    pub mod particles {
        pub mod config;
        pub mod main;
        pub mod particle;
        pub mod simulation;
    }

    /// Balls bouncing in a box
    pub mod physics {
        pub mod ball;
        pub mod collision;
        pub mod config;
        pub mod main;
        pub mod world;
    }
}
