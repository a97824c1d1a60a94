// Density rule
pub const MAX_STARS: usize = 1500;
pub const MIN_PAGE_AREA: f64 = 500_000.0; // px²
pub const AREA_PER_STAR: f64 = 12_000.0; // px² per star

// Star shape
pub const BASE_RADIUS: f64 = 1.8;
pub const BRIGHT_STAR_CHANCE: f64 = 0.06;
pub const BRIGHT_STAR_BOOST: f64 = 1.2;
pub const MIN_BASE_ALPHA: f64 = 0.1;
pub const BASE_ALPHA_SPAN: f64 = 0.9;

// Twinkle speed in radians per ms
pub const MIN_TWINKLE_SPEED: f64 = 0.001;
pub const TWINKLE_SPEED_SPAN: f64 = 0.003;

// Drift velocity spans, centred on zero
pub const DRIFT_SPAN_X: f64 = 0.08;
pub const DRIFT_SPAN_Y: f64 = 0.05;
// Velocity is per second of elapsed time
pub const DRIFT_STEP_PER_MS: f64 = 0.001;

// Twinkle curve: alpha = base * (FLOOR + RANGE * wave)
pub const TWINKLE_FLOOR: f64 = 0.6;
pub const TWINKLE_RANGE: f64 = 0.8;

// Timers (ms)
pub const RESIZE_DEBOUNCE_MS: u32 = 120;
pub const SETUP_DELAY_MS: u32 = 50;

// Gradient overlay painted under the stars
pub const GRADIENT_TOP: &str = "rgba(0,0,0,0)";
pub const GRADIENT_BOTTOM: &str = "rgba(0,0,8,0.25)";

// DOM
pub const CONTAINER_ID: &str = "starfield";
pub const FALLBACK_CLASS: &str = "css-stars";
pub const CONFIG_DATA_KEY: &str = "starfield";
