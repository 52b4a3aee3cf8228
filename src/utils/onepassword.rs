use {
    super::process::{Invocation, OutputMode, Runner},
    crate::types::error::XtaskError,
    log::{info, warn},
    std::path::Path,
};

pub const DEFAULT_VAULT: &str = "DeLoSecrets";
pub const DEFAULT_ITEM: &str = "npmjs";
pub const OTP_FIELD: &str = "otp";

/// 1Password item that holds the registry's one-time passcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnePasswordItem {
    pub vault: String,
    pub item: String,
}

impl Default for OnePasswordItem {
    fn default() -> Self {
        Self {
            vault: DEFAULT_VAULT.to_string(),
            item: DEFAULT_ITEM.to_string(),
        }
    }
}

impl OnePasswordItem {
    pub fn otp_invocation(&self, dir: &Path) -> Invocation {
        Invocation::new("op", dir).args([
            "item",
            "get",
            self.item.as_str(),
            "--vault",
            self.vault.as_str(),
            "--fields",
            OTP_FIELD,
        ])
    }
}

/// Reads the current OTP with the `op` CLI. Any failure yields `None` and the
/// registry falls back to asking for the code itself.
pub fn fetch_otp(runner: &dyn Runner, item: &OnePasswordItem, dir: &Path) -> Option<String> {
    match runner.run(&item.otp_invocation(dir), OutputMode::Capture) {
        Ok(output) => {
            let otp = output.stdout.trim();
            if otp.is_empty() {
                warn!("1Password returned an empty OTP");
                return None;
            }
            info!("retrieved OTP from 1Password");
            Some(otp.to_string())
        }
        Err(XtaskError::CommandNotFound { .. }) => {
            warn!("1Password CLI (op) not found, skipping OTP");
            None
        }
        Err(e) => {
            warn!("could not retrieve OTP from 1Password: {e}");
            None
        }
    }
}
