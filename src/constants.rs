pub const DEFAULT_CELL_WIDTH: u32 = 6;
pub const DEFAULT_ASCENT: f32 = 10.0;
pub const DEFAULT_DESCENT: f32 = 3.0;

// Render command
pub const DEFAULT_CANVAS_WIDTH: u32 = 96;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 16;

pub const CONFIG_DIR_NAME: &str = "text-faces";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Limits on sizes taken from config files and the command line
pub const MAX_CELL_WIDTH: u32 = 1024;
pub const MAX_CELL_HEIGHT: f32 = 2048.0;
pub const MAX_CANVAS_SIDE: u32 = 8192;
