use vortex_dsp::{OnePole, Svf, SvfTap};

const SR: f32 = 48_000.0;

fn steady_state_peak(mut step: impl FnMut(f32) -> f32, freq: f32) -> f32 {
    let w = core::f32::consts::TAU * freq / SR;
    let total = 48_000;
    let mut peak = 0.0f32;
    for n in 0..total {
        let y = step((w * n as f32).sin());
        if n >= total - 4_800 {
            peak = peak.max(y.abs());
        }
    }
    peak
}

fn db(ratio: f32) -> f32 {
    20.0 * ratio.log10()
}

#[test]
fn svf_lowpass_falls_twelve_db_per_octave() {
    let measure = |freq| {
        let mut svf = Svf::new();
        svf.configure(SR, 200.0, 0.707, SvfTap::Lowpass);
        steady_state_peak(|x| svf.process(x), freq)
    };
    let slope = db(measure(2_000.0) / measure(4_000.0));
    assert!((10.0..15.0).contains(&slope), "slope {slope} dB/oct");
}

#[test]
fn one_pole_lowpass_falls_six_db_per_octave() {
    let measure = |freq| {
        let mut lp = OnePole::new();
        lp.configure_lp(SR, 200.0);
        steady_state_peak(|x| lp.process_lp(x), freq)
    };
    let slope = db(measure(2_000.0) / measure(4_000.0));
    assert!((4.5..7.5).contains(&slope), "slope {slope} dB/oct");
}

#[test]
fn minimum_damping_bandpass_rings_down() {
    let mut svf = Svf::new();
    svf.configure(SR, 1_000.0, 0.01, SvfTap::Bandpass);
    let mut early = 0.0f32;
    let mut late = 0.0f32;
    for n in 0..48_000 {
        let y = svf.process(if n == 0 { 1.0 } else { 0.0 });
        assert!(y.is_finite());
        if n < 4_800 {
            early = early.max(y.abs());
        } else if n >= 38_400 {
            late = late.max(y.abs());
        }
    }
    assert!(early > 0.0);
    assert!(late < early * 0.01, "early {early}, late {late}");
}

#[test]
fn flushed_decay_reaches_exact_zero() {
    let mut svf = Svf::new();
    let mut lp = OnePole::new();
    svf.configure(SR, 1_000.0, 0.707, SvfTap::Lowpass);
    lp.configure_lp(SR, 1_000.0);
    for n in 0..48_000 {
        let x = if n == 0 { 1.0 } else { 0.0 };
        svf.process(x);
        lp.process_lp(x);
        svf.flush_denormals();
        lp.flush_denormals();
        let (s1, s2) = svf.state();
        assert!(!s1.is_subnormal() && !s2.is_subnormal() && !lp.state().is_subnormal());
    }
    assert_eq!(svf.state(), (0.0, 0.0));
    assert_eq!(lp.state(), 0.0);
}
