pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
pub const DEFAULT_MIN_SAMPLES_LEAF: usize = 1;
// Nodes with fewer rows than this build their subtrees on the current thread.
pub const PARALLEL_MIN_SAMPLES: usize = 4096;
