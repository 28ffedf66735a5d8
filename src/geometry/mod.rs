/// Canvas bounds test for drawn poses.
pub mod bounds;
pub mod normalize;
/// Body-size ratio and torso anchor used to align consecutive clips.
pub mod scale;
/// Scale-and-offset transform carried across seams.
pub mod transform;
