//! Per-browser identity used as the score key

use uuid::Uuid;

pub const COOKIE_NAME: &str = "bruin_pong_device_id";
pub const COOKIE_EXPIRY_DAYS: u32 = 365;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Look up `name` in a `document.cookie` string ("a=1; b=2")
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(|pair| pair.trim_start_matches(' '))
        .find_map(|pair| {
            pair.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Cookie assignment string for `document.cookie = ...`
pub fn format_cookie(name: &str, value: &str, expires_utc: &str) -> String {
    format!("{name}={value};expires={expires_utc};path=/;SameSite=Lax")
}

/// Expiry timestamp (ms since epoch) for a cookie written at `now_ms`
pub fn expiry_ms(now_ms: f64) -> f64 {
    now_ms + COOKIE_EXPIRY_DAYS as f64 * MS_PER_DAY
}

pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Read the identity cookie, creating and storing a fresh one if absent
#[cfg(target_arch = "wasm32")]
pub fn get_or_create() -> Result<String, wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?
        .dyn_into::<web_sys::HtmlDocument>()?;

    if let Some(existing) = find_cookie(&document.cookie()?, COOKIE_NAME) {
        return Ok(existing);
    }

    let id = generate();
    let expires = js_sys::Date::new(&JsValue::from_f64(expiry_ms(js_sys::Date::now())));
    let expires: String = expires.to_utc_string().into();
    document.set_cookie(&format_cookie(COOKIE_NAME, &id, &expires))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie() {
        let cookies = "theme=dark; bruin_pong_device_id=abc-123; other=1";
        assert_eq!(find_cookie(cookies, COOKIE_NAME), Some("abc-123".to_string()));
        assert_eq!(find_cookie(cookies, "theme"), Some("dark".to_string()));
        assert_eq!(find_cookie(cookies, "missing"), None);
        assert_eq!(find_cookie("", COOKIE_NAME), None);
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        let cookies = "bruin_pong_device_id_old=x; xbruin_pong_device_id=y";
        assert_eq!(find_cookie(cookies, COOKIE_NAME), None);
    }

    #[test]
    fn test_empty_value_is_absent() {
        assert_eq!(find_cookie("bruin_pong_device_id=", COOKIE_NAME), None);
    }

    #[test]
    fn test_format_cookie() {
        let cookie = format_cookie(COOKIE_NAME, "abc", "Thu, 01 Jan 2026 00:00:00 GMT");
        assert_eq!(
            cookie,
            "bruin_pong_device_id=abc;expires=Thu, 01 Jan 2026 00:00:00 GMT;path=/;SameSite=Lax"
        );
    }

    #[test]
    fn test_expiry_is_one_year() {
        assert_eq!(expiry_ms(0.0), 365.0 * 86_400_000.0);
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        let parsed = Uuid::parse_str(&a).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(a.len(), 36);
    }
}
