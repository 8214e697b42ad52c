/// Format a COM/WASAPI `HRESULT` into a human-readable string.
///
/// Known codes are returned with their symbolic name; unknown codes are
/// formatted as hex.
pub fn hresult(code: i32) -> String {
    let bits = code as u32;
    match symbolic_name(bits) {
        Some(name) => format!("{name} ({bits:#010X})"),
        None => format!("HRESULT {bits:#010X}"),
    }
}

fn symbolic_name(bits: u32) -> Option<&'static str> {
    let name = match bits {
        0x0000_0000 => "S_OK",
        0x0000_0001 => "S_FALSE",
        0x8000_4002 => "E_NOINTERFACE",
        0x8000_4003 => "E_POINTER",
        0x8000_4005 => "E_FAIL",
        0x8000_FFFF => "E_UNEXPECTED",
        0x8007_000E => "E_OUTOFMEMORY",
        0x8007_0057 => "E_INVALIDARG",
        0x8007_0490 => "E_NOTFOUND",
        0x8001_0106 => "RPC_E_CHANGED_MODE",
        0x8004_0154 => "REGDB_E_CLASSNOTREG",
        0x8889_0001 => "AUDCLNT_E_NOT_INITIALIZED",
        0x8889_0002 => "AUDCLNT_E_ALREADY_INITIALIZED",
        0x8889_0003 => "AUDCLNT_E_WRONG_ENDPOINT_TYPE",
        0x8889_0004 => "AUDCLNT_E_DEVICE_INVALIDATED",
        0x8889_0005 => "AUDCLNT_E_NOT_STOPPED",
        0x8889_0008 => "AUDCLNT_E_UNSUPPORTED_FORMAT",
        0x8889_000A => "AUDCLNT_E_DEVICE_IN_USE",
        0x8889_0010 => "AUDCLNT_E_SERVICE_NOT_RUNNING",
        0x8889_0028 => "AUDCLNT_E_ENGINE_PERIODICITY_LOCKED",
        0x8889_0029 => "AUDCLNT_E_ENGINE_FORMAT_LOCKED",
        _ => return None,
    };
    Some(name)
}

/// Convert a Win32 error code (`GetLastError`) into an `HRESULT`.
pub fn hresult_from_win32(err: u32) -> i32 {
    if err == 0 {
        // The call failed without setting an error; report E_FAIL.
        0x8000_4005_u32 as i32
    } else if (err as i32) <= 0 {
        err as i32
    } else {
        ((err & 0x0000_FFFF) | 0x8007_0000) as i32
    }
}
