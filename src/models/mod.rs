mod subtitle;
mod video;

pub use subtitle::SubtitleUrl;
pub use video::VideoUrl;
