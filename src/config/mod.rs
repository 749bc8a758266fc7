pub mod file_type;
pub mod load;
pub mod save;
pub mod types;

pub use file_type::is_video_file;
pub use types::{
    Config, EncodeSettings, Language, MAX_RECENT_OUTPUTS, UserSettings, format_clock_duration,
    parse_clock_duration,
};
