use {
    crate::types::error::XtaskError,
    clap::ValueEnum,
    semver::Version,
    std::fmt,
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpLevel {
    #[value(help = "Bump patch: x.y.z -> x.y.z+1")]
    Patch,
    #[value(help = "Bump minor: x.y.z -> x.y+1.0")]
    Minor,
    #[value(help = "Bump major: x.y.z -> x+1.0.0")]
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        f.write_str(name)
    }
}

/// Parses a plain `MAJOR.MINOR.PATCH` version.
///
/// Each component is read as a decimal integer, so `1.02.3` is `1.2.3`.
/// Pre-release and build metadata are rejected: published manifests are
/// expected to carry release versions only.
pub fn parse_version(version: &str) -> Result<Version, XtaskError> {
    let invalid = || XtaskError::InvalidVersion(version.to_string());
    let component = |part: &str| -> Result<u64, XtaskError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };

    let parts: Vec<&str> = version.split('.').collect();
    let &[major, minor, patch] = parts.as_slice() else {
        return Err(invalid());
    };
    Ok(Version::new(
        component(major)?,
        component(minor)?,
        component(patch)?,
    ))
}

pub fn bump_version(level: BumpLevel, current: &Version) -> Version {
    let mut new_version = current.clone();
    match level {
        BumpLevel::Major => {
            new_version.major = new_version.major.saturating_add(1);
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpLevel::Minor => {
            new_version.minor = new_version.minor.saturating_add(1);
            new_version.patch = 0;
        }
        BumpLevel::Patch => {
            new_version.patch = new_version.patch.saturating_add(1);
        }
    }
    new_version
}

/// String-in, string-out form used on manifest versions.
pub fn next_version(level: BumpLevel, current: &str) -> Result<String, XtaskError> {
    let current = parse_version(current)?;
    Ok(bump_version(level, &current).to_string())
}
