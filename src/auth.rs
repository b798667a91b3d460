use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "PBKDF_PASSWORD";

/// Reads the password to check against an existing hash.
pub fn read_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env_or_stdin()? {
        return Ok(pw);
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    Ok(pw)
}

/// Reads a password to hash. Interactive input is asked for twice.
pub fn read_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env_or_stdin()? {
        return Ok(pw);
    }

    let pw1 = Zeroizing::new(rpassword::prompt_password("New password: ")?);
    let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);

    if pw1 != pw2 {
        bail!("passwords do not match");
    }

    Ok(pw1)
}

fn from_env_or_stdin() -> Result<Option<Zeroizing<String>>> {
    //  PBKDF_PASSWORD="supersecret" pbkdf hash
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(Some(Zeroizing::new(pw)));
    }

    //  echo "supersecret" | pbkdf verify '$pbkdf2-sha256$...'
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin()
            .read_line(&mut buf)
            .context("failed to read password from stdin")?;
        trim_newline(&mut buf);
        return Ok(Some(buf));
    }

    Ok(None)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
