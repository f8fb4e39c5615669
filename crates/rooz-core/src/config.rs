use std::fs;
use std::path::{
  Path,
  PathBuf
};

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

use crate::error::{
  LabelError,
  Result
};
use crate::render::OutputFormat;
use crate::weekday::{
  DEFAULT_TIMEZONE,
  parse_timezone
};

const CONFIG_FILE: &str = "rooz.toml";
pub const TIMEZONE_ENV_VAR: &str =
  "ROOZ_TIMEZONE";
pub const CONFIG_ENV_VAR: &str =
  "ROOZ_CONFIG";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  timezone: Option<String>,
  format:   Option<String>,
  time:     Option<TimeSection>
}

#[derive(Debug, Deserialize)]
struct TimeSection {
  timezone: Option<String>
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub timezone: Option<String>,
  pub format:   Option<String>,
  pub config:   Option<PathBuf>
}

#[derive(Debug, Clone)]
pub struct Settings {
  pub timezone:    Tz,
  pub format:      OutputFormat,
  pub loaded_file: Option<PathBuf>
}

impl Settings {
  /// Resolves settings against the process environment.
  pub fn load(
    overrides: &Overrides
  ) -> Result<Self> {
    Self::resolve(overrides, |key| {
      std::env::var(key).ok()
    })
  }

  /// Resolution order: overrides, environment, config file, defaults.
  ///
  /// `env` looks up environment variables.
  #[tracing::instrument(skip(env))]
  pub fn resolve<F>(
    overrides: &Overrides,
    env: F
  ) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>
  {
    let explicit_path = overrides
      .config
      .clone()
      .or_else(|| {
        non_empty(env(CONFIG_ENV_VAR))
          .map(PathBuf::from)
      });

    let (file, loaded_file) =
      match explicit_path {
        | Some(path) => {
          let file = read_config(&path)?;
          (file, Some(path))
        }
        | None => {
          match default_config_path() {
            | Some(path)
              if path.exists() =>
            {
              let file =
                read_config(&path)?;
              (file, Some(path))
            }
            | Some(path) => {
              info!(
                file = %path.display(),
                "config file not found; using defaults"
              );
              (FileConfig::default(), None)
            }
            | None => {
              (FileConfig::default(), None)
            }
          }
        }
      };

    let file_source = loaded_file
      .as_ref()
      .map(|p| {
        format!("file:{}", p.display())
      })
      .unwrap_or_else(|| {
        "file".to_string()
      });

    let file_timezone = file
      .timezone
      .clone()
      .or_else(|| {
        file
          .time
          .as_ref()
          .and_then(|section| {
            section.timezone.clone()
          })
      });

    let (tz_source, tz_raw) = first_set(
      [
        (
          "cli".to_string(),
          overrides.timezone.clone()
        ),
        (
          format!("env:{TIMEZONE_ENV_VAR}"),
          env(TIMEZONE_ENV_VAR)
        ),
        (file_source.clone(), file_timezone),
        (
          "default".to_string(),
          Some(DEFAULT_TIMEZONE.to_string())
        )
      ]
    )
    .unwrap_or_else(|| {
      (
        "default".to_string(),
        DEFAULT_TIMEZONE.to_string()
      )
    });

    let timezone = parse_timezone(&tz_raw)
      .inspect_err(|err| {
        tracing::error!(
          source = %tz_source,
          timezone = %tz_raw,
          error = %err,
          "failed to parse timezone id"
        );
      })?;
    info!(
      source = %tz_source,
      timezone = %timezone,
      "configured timezone"
    );

    let format = match first_set([
      (
        "cli".to_string(),
        overrides.format.clone()
      ),
      (file_source, file.format)
    ]) {
      | Some((source, raw)) => {
        debug!(source = %source, format = %raw, "configured output format");
        raw.parse::<OutputFormat>()?
      }
      | None => OutputFormat::default()
    };

    Ok(Self {
      timezone,
      format,
      loaded_file
    })
  }
}

/// First candidate with a non-blank value; blank ones are skipped with a
/// warning.
fn first_set<const N: usize>(
  candidates: [(String, Option<String>);
    N]
) -> Option<(String, String)> {
  for (source, value) in candidates {
    let Some(value) = value else {
      continue;
    };
    if value.trim().is_empty() {
      warn!(
        source = %source,
        "setting was empty; skipping"
      );
      continue;
    }
    return Some((source, value));
  }
  None
}

fn non_empty(
  value: Option<String>
) -> Option<String> {
  value
    .map(|raw| raw.trim().to_string())
    .filter(|raw| !raw.is_empty())
}

fn default_config_path()
-> Option<PathBuf> {
  dirs::config_dir().map(|dir| {
    dir.join("rooz").join(CONFIG_FILE)
  })
}

fn read_config(
  path: &Path
) -> Result<FileConfig> {
  let raw = fs::read_to_string(path)
    .map_err(|source| {
      LabelError::ConfigRead {
        path: path.to_path_buf(),
        source
      }
    })?;
  let parsed = toml::from_str::<
    FileConfig
  >(&raw)
  .map_err(|source| {
    LabelError::ConfigParse {
      path: path.to_path_buf(),
      source
    }
  })?;
  info!(file = %path.display(), "loaded config file");
  Ok(parsed)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::fs;

  use tempfile::{
    TempDir,
    tempdir
  };

  use super::*;

  fn env_from(
    pairs: &[(&str, &str)]
  ) -> impl Fn(&str) -> Option<String>
  {
    let map: HashMap<String, String> =
      pairs
        .iter()
        .map(|(k, v)| {
          (k.to_string(), v.to_string())
        })
        .collect();
    move |key| map.get(key).cloned()
  }

  /// Points at an empty config file so the user's own file is ignored.
  fn empty_config(
    dir: &TempDir
  ) -> Overrides {
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").expect("write");
    Overrides {
      config: Some(path),
      ..Overrides::default()
    }
  }

  #[test]
  fn defaults_to_tehran_text() {
    let dir = tempdir().expect("tempdir");
    let settings = Settings::resolve(
      &empty_config(&dir),
      env_from(&[])
    )
    .expect("resolve");
    assert_eq!(
      settings.timezone,
      chrono_tz::Asia::Tehran
    );
    assert_eq!(
      settings.format,
      OutputFormat::Text
    );
  }

  #[test]
  fn cli_beats_env_beats_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rooz.toml");
    fs::write(
      &path,
      "timezone = \"Europe/Berlin\"\nformat = \"json\"\n"
    )
    .expect("write");

    let mut overrides = Overrides {
      config: Some(path.clone()),
      ..Overrides::default()
    };
    let env = env_from(&[(
      TIMEZONE_ENV_VAR,
      "Asia/Tokyo"
    )]);

    let from_env =
      Settings::resolve(&overrides, &env)
        .expect("resolve");
    assert_eq!(
      from_env.timezone,
      chrono_tz::Asia::Tokyo
    );
    assert_eq!(
      from_env.format,
      OutputFormat::Json
    );
    assert_eq!(
      from_env.loaded_file,
      Some(path.clone())
    );

    overrides.timezone =
      Some("UTC".to_string());
    overrides.format =
      Some("html".to_string());
    let from_cli =
      Settings::resolve(&overrides, &env)
        .expect("resolve");
    assert_eq!(
      from_cli.timezone,
      chrono_tz::UTC
    );
    assert_eq!(
      from_cli.format,
      OutputFormat::Html
    );

    let from_file = Settings::resolve(
      &Overrides {
        config: Some(path),
        ..Overrides::default()
      },
      env_from(&[])
    )
    .expect("resolve");
    assert_eq!(
      from_file.timezone,
      chrono_tz::Europe::Berlin
    );
  }

  #[test]
  fn reads_time_section() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rooz.toml");
    fs::write(
      &path,
      "[time]\ntimezone = \"America/Mexico_City\"\n"
    )
    .expect("write");
    let settings = Settings::resolve(
      &Overrides::default(),
      env_from(&[(
        CONFIG_ENV_VAR,
        path.to_str().expect("utf-8 path")
      )])
    )
    .expect("resolve");
    assert_eq!(
      settings.timezone,
      chrono_tz::America::Mexico_City
    );
  }

  #[test]
  fn blank_values_fall_through() {
    let dir = tempdir().expect("tempdir");
    let settings = Settings::resolve(
      &Overrides {
        timezone: Some("  ".to_string()),
        ..empty_config(&dir)
      },
      env_from(&[(TIMEZONE_ENV_VAR, "")])
    )
    .expect("resolve");
    assert_eq!(
      settings.timezone,
      chrono_tz::Asia::Tehran
    );
  }

  #[test]
  fn invalid_zone_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = Settings::resolve(
      &empty_config(&dir),
      env_from(&[(
        TIMEZONE_ENV_VAR,
        "Not/AZone"
      )])
    )
    .expect_err("must fail");
    assert!(matches!(
      err,
      LabelError::InvalidTimeZone { .. }
    ));
  }

  #[test]
  fn unknown_format_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = Settings::resolve(
      &Overrides {
        format: Some("yaml".to_string()),
        ..empty_config(&dir)
      },
      env_from(&[])
    )
    .expect_err("must fail");
    assert!(matches!(
      err,
      LabelError::UnknownFormat { .. }
    ));
  }

  #[test]
  fn missing_explicit_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = Settings::resolve(
      &Overrides {
        config: Some(
          dir.path().join("absent.toml")
        ),
        ..Overrides::default()
      },
      env_from(&[])
    )
    .expect_err("must fail");
    assert!(matches!(
      err,
      LabelError::ConfigRead { .. }
    ));
  }

  #[test]
  fn malformed_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rooz.toml");
    fs::write(&path, "timezone = [")
      .expect("write");
    let err = Settings::resolve(
      &Overrides {
        config: Some(path),
        ..Overrides::default()
      },
      env_from(&[])
    )
    .expect_err("must fail");
    assert!(matches!(
      err,
      LabelError::ConfigParse { .. }
    ));
  }
}
