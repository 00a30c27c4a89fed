//! Host platform detection.

/// Reports which operating system the process runs on.
pub trait PlatformDetector {
    /// Operating system name, e.g. `"macos"` or `"linux"`.
    fn os_name(&self) -> &str;

    /// Returns `true` on macOS, the only platform with presentation options.
    fn is_macos(&self) -> bool {
        let os = self.os_name().to_lowercase();
        os.contains("mac") || os.contains("darwin")
    }
}

/// The platform this binary was compiled for.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl PlatformDetector for HostPlatform {
    fn os_name(&self) -> &str { std::env::consts::OS }
}
