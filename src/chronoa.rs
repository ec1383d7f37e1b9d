// Repeating Chrono-Amperometry View
// Typed accessors for the CHRONOA header fields and curve columns

use std::path::Path;

use crate::explain::{
    Curve, DtaError, Experiment, Header, Result, COL_CURRENT, COL_POTENTIAL, COL_TIME,
};

/// The canonical columns of one chrono-amperometry curve.
///
/// Borrowed straight from the stored table, so row order is the file's
/// acquisition order:
/// - `time`: elapsed time, in seconds
/// - `potential`: measured potential, in V
/// - `current`: measured current, in A
#[derive(Debug, Clone, Copy)]
pub struct CurveView<'a> {
    pub time: &'a [f64],
    pub potential: &'a [f64],
    pub current: &'a [f64],
}

impl<'a> CurveView<'a> {
    fn select(curve: &'a Curve) -> Result<Self> {
        let time = curve
            .column(COL_TIME)
            .ok_or(DtaError::MissingColumn(COL_TIME))?;
        let potential = curve
            .column(COL_POTENTIAL)
            .ok_or(DtaError::MissingColumn(COL_POTENTIAL))?;
        let current = curve
            .column(COL_CURRENT)
            .ok_or(DtaError::MissingColumn(COL_CURRENT))?;
        Ok(CurveView {
            time,
            potential,
            current,
        })
    }

    /// Number of sample rows.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// View over a repeating chrono-amperometry experiment in EXPLAIN format.
///
/// Wraps an injected [`Experiment`] loader and names the CHRONOA header
/// fields. Every accessor checks that the loader has run; reading an
/// unloaded experiment yields [`DtaError::NotLoaded`].
pub struct RepeatingChronoAmperometry<E: Experiment> {
    experiment: E,
}

impl<E: Experiment> RepeatingChronoAmperometry<E> {
    pub fn new(experiment: E) -> Self {
        RepeatingChronoAmperometry { experiment }
    }

    /// Load the DTA file at `path` through the injected loader.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.experiment.load(path.as_ref())
    }

    pub fn loaded(&self) -> bool {
        self.experiment.loaded()
    }

    pub fn experiment(&self) -> &E {
        &self.experiment
    }

    pub fn experiment_mut(&mut self) -> &mut E {
        &mut self.experiment
    }

    pub fn into_inner(self) -> E {
        self.experiment
    }

    fn header(&self) -> Result<&Header> {
        if !self.experiment.loaded() {
            return Err(DtaError::NotLoaded);
        }
        Ok(self.experiment.header())
    }

    fn curves(&self) -> Result<&[Curve]> {
        if !self.experiment.loaded() {
            return Err(DtaError::NotLoaded);
        }
        Ok(self.experiment.curves())
    }

    /// Retrieve the time/potential/current columns of curve `index`.
    ///
    /// Repeating CHRONOA experiments record one curve per cycle; `index` 0
    /// is the first recorded cycle. Row order is preserved.
    pub fn curve(&self, index: usize) -> Result<CurveView<'_>> {
        let curves = self.curves()?;
        let curve = curves.get(index).ok_or(DtaError::CurveOutOfRange {
            index,
            count: curves.len(),
        })?;
        CurveView::select(curve)
    }

    /// Number of recorded curves.
    pub fn curve_count(&self) -> Result<usize> {
        Ok(self.curves()?.len())
    }

    /// Number of samples collected for curve `curve`, or 0 when the
    /// experiment recorded no curves at all.
    pub fn sample_count(&self, curve: usize) -> Result<usize> {
        let curves = self.curves()?;
        if curves.is_empty() {
            return Ok(0);
        }
        curves
            .get(curve)
            .map(Curve::len)
            .ok_or(DtaError::CurveOutOfRange {
                index: curve,
                count: curves.len(),
            })
    }

    /// Experiment tag from the header, e.g. `CHRONOA`.
    pub fn experiment_type(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("TAG"))
    }

    /// Name of the potentiostat used for the experiment.
    pub fn potentiostat(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("PSTAT"))
    }

    /// Date the experiment was run.
    pub fn date(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("DATE"))
    }

    /// Time of day the experiment was run.
    pub fn time(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("TIME"))
    }

    /// Programmed sample period, in seconds.
    pub fn sample_time(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("SAMPLETIME"))
    }

    /// Current range mode, e.g. "AUTO" or "MANUAL".
    pub fn current_range_mode(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("IERANGEMODE"))
    }

    /// Current range setting of the potentiostat.
    ///
    /// Unlike the other getters this field is mandatory: a missing key is
    /// [`DtaError::MissingField`] and a non-numeric value is
    /// [`DtaError::FieldType`].
    pub fn current_range(&self) -> Result<i64> {
        let value = self
            .header()?
            .get("IERANGE")
            .ok_or(DtaError::MissingField("IERANGE"))?;
        value.as_i64().ok_or_else(|| DtaError::FieldType {
            field: "IERANGE",
            value: value.to_string(),
        })
    }

    /// First step potential, in V.
    pub fn vstep1(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("VSTEP1"))
    }

    /// Second step potential, in V.
    pub fn vstep2(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("VSTEP2"))
    }

    /// First step duration, in seconds.
    pub fn tstep1(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("TSTEP1"))
    }

    /// Second step duration, in seconds.
    pub fn tstep2(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("TSTEP2"))
    }

    /// Programmed number of step cycles.
    pub fn cycle_count(&self) -> Result<Option<i64>> {
        Ok(self.header()?.get_i64("CYCLES"))
    }

    /// Current stability setting, in A.
    pub fn current_stability(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("IESTAB"))
    }

    /// Control amplifier speed, in A/s.
    pub fn control_amp_speed(&self) -> Result<Option<f64>> {
        Ok(self.header()?.get_f64("CASPEED"))
    }

    /// Current sign convention, e.g. "ANODIC" or "CATHODIC".
    pub fn current_convention(&self) -> Result<Option<&str>> {
        Ok(self.header()?.get_str("CONVENTION"))
    }
}
