//! Tick line parsing.

use candlewick_types::{Result, Tick, TickParseError, TickSource};

use crate::MultiFileStream;

/// Parses one `epoch,price,size` line.
///
/// Fields are trimmed of surrounding whitespace. Exactly three fields are
/// required.
///
/// # Errors
///
/// Returns an error if the field count is wrong or a field is not numeric.
pub fn parse_line(line: &str) -> std::result::Result<Tick, TickParseError> {
    let mut fields = line.split(',').map(str::trim);
    let (Some(epoch), Some(price), Some(size), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(TickParseError::FieldCount {
            line: line.to_string(),
            found: line.split(',').count(),
        });
    };

    let epoch = epoch
        .parse::<i64>()
        .map_err(|_| TickParseError::InvalidEpoch(line.to_string()))?;
    let price = price
        .parse::<f64>()
        .map_err(|_| TickParseError::InvalidPrice(line.to_string()))?;
    let size = size
        .parse::<f64>()
        .map_err(|_| TickParseError::InvalidSize(line.to_string()))?;

    Ok(Tick::new(epoch, price, size))
}

/// Reads the next tick from a stream.
///
/// Returns None at the end of the stream, and also on an empty line: an
/// empty line ends the side the same way the end of its files does.
///
/// # Errors
///
/// Returns an error if the stream fails or the line is malformed.
pub fn parse_tick(stream: &mut MultiFileStream) -> Result<Option<Tick>> {
    match stream.next_line()? {
        None => Ok(None),
        Some("") => Ok(None),
        Some(line) => Ok(Some(parse_line(line)?)),
    }
}

impl TickSource for MultiFileStream {
    fn next_tick(&mut self) -> Result<Option<Tick>> {
        parse_tick(self)
    }
}
