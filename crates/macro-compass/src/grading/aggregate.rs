use super::grade::{Grade, Letter};

/// Collapses grades into one overall letter.
///
/// `Unavailable` entries are dropped first; with nothing left the result is
/// `Unavailable`. The remaining ordinals are averaged and the mean is rounded
/// half away from zero, so a mean of exactly `x.5` moves toward the worse
/// letter.
pub fn aggregate<I>(grades: I) -> Grade
where
    I: IntoIterator<Item = Grade>,
{
    let (sum, count) = grades
        .into_iter()
        .filter_map(Grade::letter)
        .fold((0u32, 0u32), |(sum, count), letter| {
            (sum + u32::from(letter.ordinal()), count + 1)
        });

    if count == 0 {
        return Grade::Unavailable;
    }

    let mean = f64::from(sum) / f64::from(count);
    let index = mean.round().clamp(0.0, 4.0) as u8;
    Letter::from_ordinal(index)
        .map(Grade::Graded)
        .unwrap_or(Grade::Unavailable)
}
