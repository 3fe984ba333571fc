use crate::errors::GameError;

/// Resolves a column index against the number of columns.
///
/// # Errors
///
/// Returns [`GameError::InvalidColumnIndex`] if `index` is not below `len`.
///
/// # Examples
///
/// ```
/// use yamb_engine::rules::ensure_column;
/// use yamb_engine::errors::GameError;
///
/// assert_eq!(ensure_column(2, 4), Ok(2));
/// assert!(matches!(
///     ensure_column(4, 4),
///     Err(GameError::InvalidColumnIndex { index: 4, len: 4 })
/// ));
/// ```
pub fn ensure_column(index: usize, len: usize) -> Result<usize, GameError> {
    if index < len {
        Ok(index)
    } else {
        Err(GameError::InvalidColumnIndex { index, len })
    }
}

/// Validates a replacement mask for the roll about to happen.
///
/// `roll` is the number of rolls already made this turn. A mask is refused
/// on the first roll and must otherwise have one entry per die.
///
/// # Errors
///
/// - [`GameError::ReplacementOnFirstRoll`] - a mask was given before any roll
/// - [`GameError::InvalidReplacementMask`] - the mask length differs from `dice`
///
/// # Examples
///
/// ```
/// use yamb_engine::rules::ensure_replacements;
/// use yamb_engine::errors::GameError;
///
/// let mask = [true, false, false, true, false];
/// assert!(ensure_replacements(1, 5, Some(&mask)).is_ok());
/// assert!(ensure_replacements(0, 5, None).is_ok());
/// assert_eq!(
///     ensure_replacements(0, 5, Some(&mask)),
///     Err(GameError::ReplacementOnFirstRoll)
/// );
/// ```
pub fn ensure_replacements(
    roll: usize,
    dice: usize,
    replace: Option<&[bool]>,
) -> Result<(), GameError> {
    match replace {
        None => Ok(()),
        Some(_) if roll == 0 => Err(GameError::ReplacementOnFirstRoll),
        Some(mask) if mask.len() != dice => Err(GameError::InvalidReplacementMask {
            expected: dice,
            actual: mask.len(),
        }),
        Some(_) => Ok(()),
    }
}

/// Writes `drawn` into the positions of `results` selected by `mask`, in order.
///
/// `drawn` must hold exactly as many values as `mask` has `true` entries.
pub fn replace_results(results: &mut [u8], mask: &[bool], drawn: &[u8]) {
    let targets = results
        .iter_mut()
        .zip(mask)
        .filter_map(|(r, &replace)| replace.then_some(r));
    for (r, &d) in targets.zip(drawn) {
        *r = d;
    }
}
