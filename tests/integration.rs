// tests/integration.rs
// Integration tests for DTA Reader

use std::path::Path;

use dta_reader::{
    Curve, DtaError, Experiment, Header, RepeatingChronoAmperometry, Result, COL_CURRENT,
    COL_POTENTIAL, COL_TIME,
};

/// Loader standing in for a real EXPLAIN parser: `load` fills in the header
/// and curves a repeating CHRONOA export would produce.
#[derive(Default)]
struct FakeDtaLoader {
    loaded: bool,
    header: Header,
    curves: Vec<Curve>,
    cycles: usize,
    samples_per_cycle: usize,
}

impl FakeDtaLoader {
    fn new(cycles: usize, samples_per_cycle: usize) -> Self {
        FakeDtaLoader {
            cycles,
            samples_per_cycle,
            ..Default::default()
        }
    }
}

impl Experiment for FakeDtaLoader {
    fn load(&mut self, path: &Path) -> Result<()> {
        if path.extension().and_then(|e| e.to_str()) != Some("DTA") {
            return Err(DtaError::Parse(format!(
                "not a DTA file: {}",
                path.display()
            )));
        }

        self.header.insert("TAG", "CHRONOA");
        self.header.insert("TITLE", "Repeating Chronoamperometry");
        self.header.insert("PSTAT", "Interface 1000");
        self.header.insert("DATE", "2/18/2025");
        self.header.insert("TIME", "14:06:30");
        self.header.insert("SAMPLETIME", 0.01);
        self.header.insert("IERANGEMODE", "AUTO");
        self.header.insert("IERANGE", "7");
        self.header.insert("VSTEP1", -1.2);
        self.header.insert("VSTEP2", 0.6);
        self.header.insert("TSTEP1", 2.0);
        self.header.insert("TSTEP2", 2.0);
        self.header.insert("CYCLES", self.cycles as i64);
        self.header.insert("CONVENTION", "ANODIC");

        for cycle in 0..self.cycles {
            let mut curve = Curve::new();
            let time: Vec<f64> = (0..self.samples_per_cycle)
                .map(|i| i as f64 * 0.01)
                .collect();
            let potential = vec![if cycle % 2 == 0 { -1.2 } else { 0.6 }; self.samples_per_cycle];
            // Decaying step response
            let current: Vec<f64> = (0..self.samples_per_cycle)
                .map(|i| 1e-5 * (-(i as f64) * 0.05).exp())
                .collect();
            curve.push_column(COL_TIME, time)?;
            curve.push_column(COL_POTENTIAL, potential)?;
            curve.push_column(COL_CURRENT, current)?;
            // Extra instrument columns the canonical view must skip
            curve.push_column("Vu", vec![0.0; self.samples_per_cycle])?;
            curve.push_column("Q", vec![0.0; self.samples_per_cycle])?;
            self.curves.push(curve);
        }

        self.loaded = true;
        Ok(())
    }

    fn loaded(&self) -> bool {
        self.loaded
    }

    fn header(&self) -> &Header {
        &self.header
    }

    fn curves(&self) -> &[Curve] {
        &self.curves
    }
}

#[test]
fn test_load_and_read_experiment() {
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(4, 200));
    ca.load("repeating_chronoa.DTA").expect("load failed");

    assert!(ca.loaded());
    assert_eq!(ca.experiment_type().unwrap(), Some("CHRONOA"));
    assert_eq!(ca.curve_count().unwrap(), 4);
    assert_eq!(ca.cycle_count().unwrap(), Some(4));

    for index in 0..4 {
        let curve = ca.curve(index).expect("curve missing");
        assert_eq!(curve.len(), 200);
        assert_eq!(ca.sample_count(index).unwrap(), 200);
    }
}

#[test]
fn test_curve_view_row_order() {
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(2, 50));
    ca.load("steps.DTA").unwrap();

    let curve = ca.curve(0).unwrap();
    assert_eq!(curve.time[0], 0.0);
    assert!(curve.time.windows(2).all(|w| w[0] < w[1]));
    // Step response decays monotonically
    assert!(curve.current.windows(2).all(|w| w[0] > w[1]));
    assert!(curve.potential.iter().all(|&v| v == -1.2));

    let second = ca.curve(1).unwrap();
    assert!(second.potential.iter().all(|&v| v == 0.6));
}

#[test]
fn test_header_getters_end_to_end() {
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(1, 10));
    ca.load("single.DTA").unwrap();

    assert_eq!(ca.potentiostat().unwrap(), Some("Interface 1000"));
    assert_eq!(ca.date().unwrap(), Some("2/18/2025"));
    assert_eq!(ca.time().unwrap(), Some("14:06:30"));
    assert_eq!(ca.sample_time().unwrap(), Some(0.01));
    assert_eq!(ca.current_range_mode().unwrap(), Some("AUTO"));
    assert_eq!(ca.current_range().unwrap(), 7);
    assert_eq!(ca.vstep1().unwrap(), Some(-1.2));
    assert_eq!(ca.vstep2().unwrap(), Some(0.6));
    assert_eq!(ca.tstep1().unwrap(), Some(2.0));
    assert_eq!(ca.tstep2().unwrap(), Some(2.0));
    assert_eq!(ca.current_convention().unwrap(), Some("ANODIC"));
    // Not every export carries these
    assert_eq!(ca.current_stability().unwrap(), None);
    assert_eq!(ca.control_amp_speed().unwrap(), None);
}

#[test]
fn test_error_handling() {
    // Accessors before load
    let ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(1, 10));
    assert!(matches!(ca.potentiostat(), Err(DtaError::NotLoaded)));
    assert!(matches!(ca.curve(0), Err(DtaError::NotLoaded)));

    // Loader failure propagates and leaves the view unloaded
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(1, 10));
    let result = ca.load("notes.txt");
    assert!(matches!(result, Err(DtaError::Parse(_))));
    assert!(!ca.loaded());

    // Out-of-range curve after a successful load
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(2, 10));
    ca.load("short.DTA").unwrap();
    assert!(matches!(
        ca.curve(7),
        Err(DtaError::CurveOutOfRange { index: 7, count: 2 })
    ));
}

// Example program showing how to use the library
#[test]
fn example_usage() {
    let mut ca = RepeatingChronoAmperometry::new(FakeDtaLoader::new(3, 100));
    match ca.load("example.DTA") {
        Ok(_) => println!("Successfully loaded DTA file"),
        Err(e) => {
            println!("Error loading file: {}", e);
            return;
        }
    }

    println!("\nHeader:");
    for (key, value) in ca.experiment().header().iter() {
        println!("  {}: {}", key, value);
    }

    println!("\nExperiment Information:");
    println!("  Type: {:?}", ca.experiment_type().unwrap());
    println!("  Potentiostat: {:?}", ca.potentiostat().unwrap());
    println!("  Curves: {}", ca.curve_count().unwrap());
    println!("  Sample period: {:?} s", ca.sample_time().unwrap());
    println!("  Current range: {}", ca.current_range().unwrap());

    println!("\nCurve Statistics:");
    for i in 0..ca.curve_count().unwrap() {
        let curve = ca.curve(i).unwrap();
        let min = curve.current.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = curve
            .current
            .iter()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        println!(
            "  Curve {}: {} samples, {:.3e}A to {:.3e}A",
            i,
            curve.len(),
            min,
            max
        );
    }
}
