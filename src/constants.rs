/// Color returned for lines the graph does not know about
pub const DEFAULT_LINE_COLOR: &str = "#999";

/// Average train speed used by the time-based cost (km/h)
pub const DEFAULT_VELOCITY_KMH: f64 = 80.0;

/// Dwell at a single-line station when the train continues on the same line (seconds)
pub const DEFAULT_DWELL_TIME_NORMAL_SEC: f64 = 30.0;

/// Dwell at a transfer station when the train continues on the same line (seconds)
pub const DEFAULT_DWELL_TIME_TRANSFER_SEC: f64 = 60.0;

/// Time spent walking between platforms when changing line (seconds)
pub const DEFAULT_TRANSFER_TIME_SEC: f64 = 300.0;

/// Cost of a single line change under the fewest-transfers strategy
///
/// Large enough that any number of extra stops on a city-scale network is
/// cheaper than one more transfer.
pub const TRANSFER_PENALTY: f64 = 1000.0;

/// Cost of a single hop under the fewest-transfers strategy
pub const STOP_PENALTY: f64 = 1.0;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Fixed number of simulation steps; the layout always runs to completion in bounded time
pub const LAYOUT_ITERATIONS: usize = 300;
pub const LAYOUT_REPULSION: f64 = 20_000.0;
/// Node pairs further apart than this are skipped by the repulsion pass
pub const LAYOUT_REPULSION_RANGE: f64 = 6000.0;
/// Rest length of a link spring
pub const LAYOUT_LINK_DISTANCE: f64 = 62.0;
pub const LAYOUT_SPRING_STRENGTH: f64 = 0.5;
pub const LAYOUT_OCTOLINEAR_STRENGTH: f64 = 0.9;
pub const LAYOUT_STRAIGHTEN_STRENGTH: f64 = 0.5;
pub const LAYOUT_GRID_SNAP_STRENGTH: f64 = 0.2;
pub const LAYOUT_GRID_SIZE: f64 = 50.0;
pub const LAYOUT_ANGULAR_STRENGTH: f64 = 1200.0;
/// Scale applied to the angular separation impulse
pub const LAYOUT_ANGULAR_DAMPING: f64 = 0.1;
/// Fraction of iterations run before octolinear torque kicks in
pub const LAYOUT_WARMUP_FRACTION: f64 = 0.3;
/// Fraction of iterations after which grid snapping kicks in
pub const LAYOUT_LATE_STAGE_FRACTION: f64 = 0.7;
/// Step size at iteration zero; decreases linearly to zero
pub const LAYOUT_COOLING: f64 = 0.6;
/// Velocity retained between iterations
pub const LAYOUT_VELOCITY_DAMPING: f64 = 0.5;

/// Margin kept on every side of the viewport when fitting the diagram (pixels)
pub const VIEW_PADDING: f64 = 40.0;
