//! Build metadata accessors
//!
//! Includes the version.rs generated by the build script, providing a
//! single source of truth for build time and git revision.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}
