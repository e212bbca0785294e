use std::ffi::CStr;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const MACHINE_ID_PATH: &str = "/etc/machine-id";

#[derive(Debug, Error)]
pub enum HostnameError {
    #[error("failed to read hostname: {0}")]
    Os(#[from] io::Error),

    #[error("hostname is not valid UTF-8")]
    NotUtf8,
}

#[derive(Debug, Error)]
pub enum MachineIdError {
    #[error("failed to read machine id: {0}")]
    Read(#[from] io::Error),
}

pub fn is_superuser() -> bool {
    unsafe { libc::geteuid() == 0 }
}

pub fn system_hostname() -> Result<String, HostnameError> {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if rc != 0 {
        return Err(io::Error::last_os_error().into());
    }

    // POSIX does not promise termination on truncation.
    let last = buf.len() - 1;
    buf[last] = 0;
    let name = CStr::from_bytes_until_nul(&buf).map_err(|_| HostnameError::NotUtf8)?;
    name.to_str()
        .map(str::to_string)
        .map_err(|_| HostnameError::NotUtf8)
}

/// Machine id used as a tiebreaker, verbatim including the trailing newline.
/// A missing file yields an empty string; any other read failure is an error.
pub fn read_machine_id(path: &Path) -> Result<String, MachineIdError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(raw),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no machine id");
            Ok(String::new())
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn machine_id_is_read_verbatim() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("machine-id");
        fs::write(&path, "0123456789abcdef\n").expect("write");
        assert_eq!(read_machine_id(&path).expect("read"), "0123456789abcdef\n");
    }

    #[test]
    fn missing_machine_id_is_empty() {
        let dir = tempdir().expect("tempdir");
        let id = read_machine_id(&dir.path().join("machine-id")).expect("missing is ok");
        assert_eq!(id, "");
    }

    #[test]
    fn non_utf8_machine_id_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("machine-id");
        fs::write(&path, [0xff, 0xfe, b'\n']).expect("write");
        assert!(matches!(read_machine_id(&path), Err(MachineIdError::Read(_))));
    }

    #[test]
    fn directory_machine_id_is_an_error() {
        let dir = tempdir().expect("tempdir");
        assert!(matches!(read_machine_id(dir.path()), Err(MachineIdError::Read(_))));
    }

    #[test]
    fn system_hostname_resolves() {
        assert!(system_hostname().is_ok());
    }
}
