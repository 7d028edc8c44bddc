//! Positional parsing of tick filenames.
//!
//! Files are named `<prefix>_<..>_<key>_<..>_<HH>.<ext>`: the batch key is the
//! third `_`-separated field and the hour is the text between the last `_`
//! and the first `.` after it. Side is signalled by `_ASK_` / `_BID_`.

use candlewick_types::FilenameError;

/// Extracts the batch key: the text between the 2nd and 3rd underscore.
///
/// # Errors
///
/// Returns [`FilenameError::MissingKey`] if the filename has fewer than three
/// underscores or the key field is empty.
pub fn extract_key(filename: &str) -> Result<&str, FilenameError> {
    let mut fields = filename.splitn(4, '_');
    let key = fields.nth(2);
    let rest = fields.next();

    match (key, rest) {
        (Some(key), Some(_)) if !key.is_empty() => Ok(key),
        _ => Err(FilenameError::MissingKey(filename.to_string())),
    }
}

/// Extracts the hour ordinal: the text after the last `_`, up to the first `.`.
///
/// # Errors
///
/// Returns [`FilenameError::InvalidHour`] if there is no underscore or the
/// text is not an integer.
pub fn extract_hour(filename: &str) -> Result<i32, FilenameError> {
    let invalid = |hour: &str| FilenameError::InvalidHour {
        filename: filename.to_string(),
        hour: hour.to_string(),
    };

    let (_, tail) = filename.rsplit_once('_').ok_or_else(|| invalid(""))?;
    let hour = tail.split_once('.').map_or(tail, |(hour, _)| hour);

    hour.parse().map_err(|_| invalid(hour))
}

/// Sorts filenames ascending by hour. The sort is stable.
///
/// # Errors
///
/// Returns the first [`FilenameError`] encountered; the slice is left
/// untouched in that case.
pub fn sort_by_hour(filenames: &mut [String]) -> Result<(), FilenameError> {
    let mut keyed = filenames
        .iter()
        .map(|name| extract_hour(name).map(|hour| (hour, name.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by_key(|(hour, _)| *hour);

    for (slot, (_, name)) in filenames.iter_mut().zip(keyed) {
        *slot = name;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_key() {
        assert_eq!(extract_key("ADAUSD_2024_0115_ASK_07.csv").unwrap(), "0115");
        assert_eq!(extract_key("a_b_c_").unwrap(), "c");
    }

    #[test]
    fn test_extract_key_too_few_underscores() {
        assert!(matches!(
            extract_key("ADAUSD_2024_0115"),
            Err(FilenameError::MissingKey(_))
        ));
        assert!(extract_key("nounderscore.csv").is_err());
        assert!(extract_key("a__ _x").is_ok());
        assert!(extract_key("a___x").is_err());
    }

    #[test]
    fn test_extract_hour() {
        assert_eq!(extract_hour("ADAUSD_2024_0115_ASK_07.csv").unwrap(), 7);
        assert_eq!(extract_hour("ADAUSD_2024_0115_BID_23.csv.gz").unwrap(), 23);
        assert_eq!(extract_hour("x_y_z_12").unwrap(), 12);
    }

    #[test]
    fn test_extract_hour_invalid() {
        let err = extract_hour("ADAUSD_2024_0115_ASK_xx.csv").unwrap_err();
        assert_eq!(
            err,
            FilenameError::InvalidHour {
                filename: "ADAUSD_2024_0115_ASK_xx.csv".into(),
                hour: "xx".into(),
            }
        );
        assert!(extract_hour("plain.csv").is_err());
        assert!(extract_hour("x_y_z_.csv").is_err());
    }

    #[test]
    fn test_sort_by_hour() {
        let mut names = vec![
            "S_1_K_ASK_10.csv".to_string(),
            "S_1_K_BID_02.csv".to_string(),
            "S_1_K_ASK_2.csv".to_string(),
            "S_1_K_BID_01.csv".to_string(),
        ];
        sort_by_hour(&mut names).unwrap();

        assert_eq!(
            names,
            vec![
                "S_1_K_BID_01.csv",
                "S_1_K_BID_02.csv",
                "S_1_K_ASK_2.csv",
                "S_1_K_ASK_10.csv",
            ]
        );
    }

    #[test]
    fn test_sort_by_hour_error_leaves_input() {
        let mut names = vec!["S_1_K_ASK_10.csv".to_string(), "S_1_K_ASK_zz.csv".to_string()];
        assert!(sort_by_hour(&mut names).is_err());
        assert_eq!(names[0], "S_1_K_ASK_10.csv");
    }
}
