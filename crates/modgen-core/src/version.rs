//! Version comparison between this generator and the one that last wrote a manifest

use semver::Version;

/// Compare the running generator against the version recorded in a manifest.
/// Returns a warning message if the manifest was written by a newer generator.
pub fn check_compatibility(
    cli_version: &str,
    manifest_version: Option<&str>,
    upgrade_command: &str,
) -> Option<String> {
    let manifest_version = manifest_version?;

    // Unparseable versions can't be compared, skip the warning
    let cli_ver = parse_version(cli_version)?;
    let manifest_ver = parse_version(manifest_version)?;

    if cli_ver < manifest_ver {
        Some(format!(
            "This project's manifest was written by generator version {}.\n\
             You are running version {}.\n\
             Consider updating: {}",
            manifest_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading `v`
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).ok()
}
