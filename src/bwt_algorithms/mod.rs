//! The bwt_algorithms module holds the Burrows-Wheeler Transform engine.
//!
//! The transform sorts every cyclic rotation of a sentinel-terminated sequence and keeps the last
//! column. Runs of similar characters become more likely in that column, which helps the entropy
//! coder that follows.
//!
//! The rotation matrix and the column-by-column reconstruction can both be walked one step at a
//! time. Those views are produced lazily so that nothing here has to keep a display cursor.
//!
pub mod bwt_sort;
