use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};

/// Supplies a password when none was given on the command line.
pub trait CredentialSource {
    fn password(&self, username: &str) -> io::Result<String>;
}

/// Reads the password from the terminal with echo disabled.
pub struct PromptCredentialSource;

impl CredentialSource for PromptCredentialSource {
    fn password(&self, username: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "Password for {username}: ")?;
        stderr.flush()?;

        let _guard = EchoGuard::disable();
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// `-p value` is used as is; a bare `-p` asks `source`.
pub fn resolve_password(
    arg: Option<Option<String>>,
    username: &str,
    source: &dyn CredentialSource,
) -> anyhow::Result<String> {
    match arg {
        Some(Some(password)) => Ok(password),
        Some(None) | None => {
            let password = source
                .password(username)
                .context("reading password from terminal")?;
            if password.is_empty() {
                bail!("empty password");
            }
            Ok(password)
        }
    }
}

#[cfg(unix)]
struct EchoGuard {
    original: libc::termios,
}

#[cfg(unix)]
impl EchoGuard {
    /// Turns off echo on stdin. `None` when stdin is not a terminal.
    fn disable() -> Option<Self> {
        // SAFETY: termios is plain data; every call checks its return code.
        unsafe {
            if libc::isatty(libc::STDIN_FILENO) != 1 {
                return None;
            }
            let mut term: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &mut term) != 0 {
                return None;
            }
            let original = term;
            term.c_lflag &= !libc::ECHO;
            term.c_lflag |= libc::ECHONL;
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &term) != 0 {
                return None;
            }
            Some(Self { original })
        }
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        // SAFETY: restores the settings read in `disable`.
        unsafe {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &self.original);
        }
    }
}

#[cfg(not(unix))]
struct EchoGuard;

#[cfg(not(unix))]
impl EchoGuard {
    fn disable() -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedSource {
        answer: &'static str,
        asked: Cell<bool>,
    }

    impl CredentialSource for FixedSource {
        fn password(&self, _username: &str) -> io::Result<String> {
            self.asked.set(true);
            Ok(self.answer.to_string())
        }
    }

    fn source(answer: &'static str) -> FixedSource {
        FixedSource {
            answer,
            asked: Cell::new(false),
        }
    }

    #[test]
    fn explicit_password_skips_prompt() {
        let source = source("unused");
        let password = resolve_password(Some(Some("pw".into())), "admin", &source).unwrap();
        assert_eq!(password, "pw");
        assert!(!source.asked.get());
    }

    #[test]
    fn bare_flag_prompts() {
        let source = source("typed");
        let password = resolve_password(Some(None), "admin", &source).unwrap();
        assert_eq!(password, "typed");
        assert!(source.asked.get());
    }

    #[test]
    fn empty_prompt_answer_is_rejected() {
        assert!(resolve_password(Some(None), "admin", &source("")).is_err());
    }
}
