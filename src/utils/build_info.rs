/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line summary printed by `car_cost_cli version`.
    pub fn summary(&self) -> String {
        format!(
            "car_cost_cli {} ({} {}, built {} for {}, {})",
            self.version, self.git_hash, self.git_status, self.timestamp, self.target, self.rustc
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("CAR_COST_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("CAR_COST_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("CAR_COST_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("CAR_COST_BUILD_TARGET").unwrap_or("unknown"),
        rustc: option_env!("CAR_COST_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
