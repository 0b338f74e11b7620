use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current local time in the format YYYY-MM-DD HH:MM:SS TZ
#[cfg(target_family = "unix")]
pub fn now() -> String {
    use std::ffi::CStr;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards");
    let secs = now.as_secs() as libc::time_t;

    let mut tm: libc::tm = unsafe { std::mem::zeroed() };

    unsafe {
        libc::localtime_r(&secs, &mut tm);
    }

    let mut buf = [0i8; 100];
    let fmt = std::ffi::CString::new("%Y-%m-%d %H:%M:%S %Z").expect("static format string");

    unsafe {
        libc::strftime(buf.as_mut_ptr(), buf.len(), fmt.as_ptr(), &tm);
        let c_str = CStr::from_ptr(buf.as_ptr());

        c_str.to_string_lossy().to_string()
    }
}

/// Returns the current local time in the format YYYY-MM-DD HH:MM:SS
#[cfg(target_family = "windows")]
pub fn now() -> String {
    let mut tm: windows_sys::Win32::Foundation::SYSTEMTIME = unsafe { std::mem::zeroed() };

    unsafe {
        windows_sys::Win32::System::SystemInformation::GetLocalTime(&mut tm);
    }

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        tm.wYear, tm.wMonth, tm.wDay, tm.wHour, tm.wMinute, tm.wSecond
    )
}

/// Returns the current Unix timestamp in seconds
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_date_and_time() {
        let stamp = now();
        assert!(stamp.len() >= 19, "unexpected timestamp: {}", stamp);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[13..14], ":");
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // Well past 2020-01-01.
        assert!(unix_timestamp() > 1_577_836_800);
    }
}
