/// Whole-list chaining into one continuous sequence.
pub mod batch;
/// Seam math shared by batch and streaming chaining.
pub mod boundary;
/// Strategies for choosing among embedded successor candidates.
pub mod pick;
pub mod stream;
