use log::info;
use ndarray::Array1;
use rand::{prelude::StdRng, SeedableRng};
use screens_lib::{
    screen::ScatteringScreen,
    signal::{domain::SampledDomain, fft::secondary_spectrum},
    theta_theta::{theta_theta, CleanOptions},
    units::{
        Angle, AngularRate, Length, Velocity, KILOMETER_PER_SECOND, KILOPARSEC, MEGAHERTZ,
        MILLIARCSECOND, SECOND,
    },
};

fn main() -> screens_lib::Result<()> {
    env_logger::init();

    let d_eff = Length::scalar(0.5, KILOPARSEC);
    let mu_eff = AngularRate::from_velocity(&Velocity::scalar(80., KILOMETER_PER_SECOND), &d_eff)?;

    let freq = SampledDomain::from_sample_interval(320., 0.02, 128);
    let time = SampledDomain::from_sample_interval(0., 30., 64);
    let f = freq.to_quantity(MEGAHERTZ);
    let t = time.to_quantity(SECOND);

    // A one-dimensional screen, all points along the direction of motion.
    let theta = Angle::new(Array1::linspace(-5., 5., 41), MILLIARCSECOND);
    let mut rng = StdRng::seed_from_u64(42);
    let screen = ScatteringScreen::gaussian(
        theta.clone(),
        Angle::scalar(0., MILLIARCSECOND),
        &Angle::scalar(1.5, MILLIARCSECOND),
        &mut rng,
    )?;

    let dynspec = screen.dynamic_spectrum(&d_eff, &mu_eff, &f, &t)?;
    info!(
        "dynamic spectrum {:?}, mean power {:.3}",
        dynspec.dim(),
        dynspec.mean().unwrap_or(0.)
    );

    let ss = secondary_spectrum(&dynspec);
    let delays = Array1::from(freq.fft_frequencies_plottable());
    let (peak, _) = ss
        .indexed_iter()
        .filter(|((k, _), _)| delays[*k] > 0.)
        .fold(((0, 0), 0.), |best, (idx, p)| if *p > best.1 { (idx, *p) } else { best });
    info!(
        "strongest positive-delay power at {:.3} us",
        delays[peak.0]
    );

    let tt = theta_theta(&theta, &d_eff, &mu_eff, &dynspec, &f, &t)?;
    let cleaned = CleanOptions::default().clean(&tt)?;
    let total: f64 = cleaned.iter().map(|x| x.norm_sqr()).sum();
    info!(
        "theta-theta {:?}, power after cleaning {:.3e}",
        cleaned.dim(),
        total
    );

    Ok(())
}
