//! Build-time information about the crate, for bindings that want to report
//! the exact tierspace they embed.

mod raw {
    // This includes the constants the `built` crate generates from the
    // manifest. A full list can be found at
    // https://docs.rs/built/latest/built/index.html
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Crate version such as 0.1.0
pub const TIERSPACE_PKG_VERSION: &str = raw::PKG_VERSION;

/// Comma separated features enabled for this build
pub const TIERSPACE_FEATURES: &str = raw::FEATURES_STR;
