pub mod settings;

pub use settings::{
    ApiSettings, CommandSettings, Settings, StatsSettings, Visibility, PLACEHOLDER_API_KEY,
};
