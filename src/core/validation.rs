use uuid::Uuid;

/// Length of the hyphenated `8-4-4-4-12` GUID form
const HYPHENATED_GUID_LEN: usize = 36;

/// Check that `value` is a GUID in its hyphenated form
///
/// `Uuid::try_parse` also accepts the simple, braced and URN forms; only
/// the hyphenated one is 36 characters long.
pub fn is_valid_guid(value: &str) -> bool {
    value.len() == HYPHENATED_GUID_LEN && Uuid::try_parse(value).is_ok()
}

/// Validate a SharePoint Online site URL
pub fn validate_sharepoint_url(url: &str) -> Result<(), String> {
    let lower = url.to_lowercase();
    if !lower.starts_with("https://") || !lower.contains(".sharepoint.com") {
        return Err(format!("{} is not a valid SharePoint Online site URL", url));
    }

    Ok(())
}

/// Scheme and host of an absolute URL, used as the token resource
pub fn resource_from_url(url: &str) -> String {
    let authority_start = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    match url[authority_start..].find('/') {
        Some(pos) => url[..authority_start + pos].to_string(),
        None => url.to_string(),
    }
}
