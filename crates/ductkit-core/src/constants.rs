//! Tolerances and fixed steps used by the layout engine.

/// Two connectors closer than this (in world units) are considered joined.
/// Diameters are not compared.
pub const COINCIDENCE_TOLERANCE: f64 = 1.0;

/// Rotation increment applied by a single rotate step, in degrees.
pub const ROTATION_STEP_DEG: f64 = 45.0;

/// Default snap sensitivity in screen pixels, divided by zoom at use site.
pub const DEFAULT_SNAP_SCREEN_DISTANCE: f64 = 20.0;

/// Lengths below this are treated as zero when deriving a direction.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Connector diameters closer than this are treated as equal when snapping.
pub const DIAMETER_EPSILON: f64 = 1e-6;

/// Diameter given to new parts when neither the catalog nor settings say
/// otherwise.
pub const DEFAULT_DIAMETER: f64 = 200.0;
