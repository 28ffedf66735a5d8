/// Windows index, segments and the immutable library bundling them.
pub mod model;
/// Nearest-centroid playback ordering.
pub mod order;
pub mod resolve;
