use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Open the configuration file with `editor`, `$EDITOR`, `$VISUAL` or the
    /// platform default, falling back to the default once.
    pub fn edit(editor: &Option<String>) -> AppResult<()> {
        let path = Config::config_file();
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `shiftlog init` first",
                path.display()
            )));
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            )),
        }

        match Command::new(&default_editor).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                ));
                Ok(())
            }
            _ => {
                error(format!(
                    "Failed to edit configuration file using fallback '{}'",
                    default_editor
                ));
                Err(AppError::Config("no usable editor".into()))
            }
        }
    }
}
