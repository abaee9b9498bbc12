use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    /// Editor chain: `--editor`, then `$EDITOR`, `$VISUAL`, then the platform default.
    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if Self::run_editor(&requested, path) {
            success(format!("Configuration file edited using '{}'", requested));
            return Ok(());
        }

        if requested == fallback {
            return Err(AppError::Config(format!(
                "failed to edit configuration with '{}'",
                requested
            )));
        }

        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            requested, fallback
        ));

        if Self::run_editor(&fallback, path) {
            success(format!("Configuration file edited using fallback '{}'", fallback));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "failed to edit configuration with fallback '{}'",
                fallback
            )))
        }
    }

    fn run_editor(editor: &str, path: &Path) -> bool {
        matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
    }
}
