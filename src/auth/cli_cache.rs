//! The Azure CLI's on-disk session: `azureProfile.json` names the active
//! subscription and account, `accessTokens.json` holds bearer tokens per
//! account. Both files belong to the CLI and are only ever read here.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ArmError, Result};

use super::AccessToken;

/// Profile file listing subscriptions.
pub const PROFILE_FILE: &str = "azureProfile.json";

/// Token cache file.
pub const TOKENS_FILE: &str = "accessTokens.json";

const CONFIG_DIR_VAR: &str = "AZURE_CONFIG_DIR";

/// `expiresOn` in UTC, as written by current CLI versions.
const UTC_EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// `expiresOn` in local time, as written by older CLI versions.
const LOCAL_EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    subscriptions: Vec<ProfileSubscription>,
}

/// A subscription entry of `azureProfile.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubscription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub environment_name: Option<String>,
    #[serde(default)]
    pub user: Option<ProfileUser>,
}

/// The account a subscription was selected with.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUser {
    pub name: String,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
}

/// One record of `accessTokens.json`.
///
/// Service principal records lack `userId`, so every field is optional and
/// only checked once the record matches the active account.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedToken {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_on: Option<String>,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("user_id", &self.user_id)
            .field("token_type", &self.token_type)
            .field("expires_on", &self.expires_on)
            .finish_non_exhaustive()
    }
}

/// Read-only view of an Azure CLI configuration directory.
#[derive(Debug, Clone)]
pub struct CliCache {
    dir: PathBuf,
}

impl CliCache {
    /// Use the CLI files found in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$AZURE_CONFIG_DIR`, else `~/.azure`.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = env::var(CONFIG_DIR_VAR) {
            return Ok(Self::new(dir));
        }
        let home = dirs::home_dir().ok_or_else(|| {
            ArmError::ConfigMissing("cannot determine the home directory".to_string())
        })?;
        Ok(Self::new(home.join(".azure")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.dir.join(TOKENS_FILE)
    }

    /// All subscriptions of the profile, in file order.
    pub fn subscriptions(&self) -> Result<Vec<ProfileSubscription>> {
        let profile: Profile = read_json(&self.profile_path())?;
        Ok(profile.subscriptions)
    }

    /// Account of the subscription flagged as default.
    ///
    /// If several are flagged the last one wins.
    pub fn default_user(&self) -> Result<String> {
        let path = self.profile_path();
        let default = self
            .subscriptions()?
            .into_iter()
            .filter(|sub| sub.is_default)
            .last()
            .ok_or_else(|| ArmError::NoDefaultSubscription(path.clone()))?;

        default.user.map(|user| user.name).ok_or_else(|| {
            ArmError::MalformedCache(format!(
                "default subscription '{}' in {} has no user",
                default.id,
                path.display()
            ))
        })
    }

    /// Id of the default subscription, or of the first one called `name`.
    pub fn subscription_id(&self, name: Option<&str>) -> Result<String> {
        let subscriptions = self.subscriptions()?;
        let found = match name {
            None => subscriptions.into_iter().find(|sub| sub.is_default),
            Some(name) => subscriptions.into_iter().find(|sub| sub.name == name),
        };

        match (found, name) {
            (Some(sub), _) => Ok(sub.id),
            (None, None) => Err(ArmError::NoDefaultSubscription(self.profile_path())),
            (None, Some(name)) => Err(ArmError::SubscriptionNotFound(name.to_string())),
        }
    }

    /// Token records in file order.
    pub fn cached_tokens(&self) -> Result<Vec<CachedToken>> {
        read_json(&self.tokens_path())
    }

    /// First cached token of the default account still valid at `now`.
    ///
    /// `now` is a naive local time, the same clock the CLI writes
    /// `expiresOn` in.
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn access_token(&self, now: NaiveDateTime) -> Result<AccessToken> {
        let user = self.default_user()?;
        let tokens = self.cached_tokens()?;
        select_token(&tokens, &user, now)
    }
}

/// Scan `tokens` in order for the first record of `user` expiring at or
/// after `now`.
///
/// Expired records and records of other accounts are skipped. A record of
/// `user` missing a required field, or with an unreadable `expiresOn`, is
/// reported as [`ArmError::MalformedCache`].
pub fn select_token(tokens: &[CachedToken], user: &str, now: NaiveDateTime) -> Result<AccessToken> {
    for token in tokens {
        if token.user_id.as_deref() != Some(user) {
            continue;
        }

        let missing = |field: &str| {
            ArmError::MalformedCache(format!("token record for '{user}' has no {field}"))
        };
        let access_token = token.access_token.as_deref().ok_or_else(|| missing("accessToken"))?;
        token.token_type.as_deref().ok_or_else(|| missing("tokenType"))?;
        let expires_on = token.expires_on.as_deref().ok_or_else(|| missing("expiresOn"))?;

        let expires_on = parse_expiry(expires_on)?;
        if expires_on < now {
            tracing::debug!(%expires_on, "skipping expired token");
            continue;
        }
        return Ok(AccessToken::new(access_token));
    }

    Err(ArmError::TokenExpired {
        user: user.to_string(),
    })
}

/// Parse an `expiresOn` value in either CLI format, as a naive local time.
///
/// The `Z`-suffixed form is UTC and is converted to the local zone.
pub fn parse_expiry(value: &str) -> Result<NaiveDateTime> {
    if let Ok(utc) = NaiveDateTime::parse_from_str(value, UTC_EXPIRY_FORMAT) {
        return Ok(utc.and_utc().with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(value, LOCAL_EXPIRY_FORMAT)
        .map_err(|_| ArmError::MalformedCache(format!("unrecognised expiresOn '{value}'")))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ArmError::CacheFileMissing(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };

    // The CLI writes its profile with a byte order mark.
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    serde_json::from_str(contents)
        .map_err(|err| ArmError::MalformedCache(format!("{}: {err}", path.display())))
}
