pub mod camera;
pub mod commands;
pub mod style;

pub use commands::{
    BodyCommand, BodyInstance, EarthCommand, FrameCommands, IndicatorCommand, InfoPanel,
    Renderer, RingCommand, ShipCommand, TailCommand,
};
