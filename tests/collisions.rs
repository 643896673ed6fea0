use elastic_particles::{Color, Particle, ParticleSet, SimConfig, Surface};

struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _width: f64, _height: f64) {}
    fn draw_circle(&mut self, _x: f64, _y: f64, _radius: f64, _fill: Color, _stroke: Color) {}
}

fn pair(a: Particle, b: Particle) -> ParticleSet {
    ParticleSet::from_particles(vec![a, b], Color::WHITE).unwrap()
}

fn disk(pos: [f64; 2], vel: [f64; 2], mass: f64) -> Particle {
    Particle::new(pos, vel, 5.0, mass, Color::BLACK).unwrap()
}

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.max(1.0)
}

/// Oblique collisions between particles of different masses, each one approaching.
fn oblique_cases() -> Vec<(Particle, Particle)> {
    vec![
        (disk([100.0, 100.0], [1.5, 0.3], 1.0), disk([106.0, 104.0], [-0.7, -1.1], 1.0)),
        (disk([50.0, 50.0], [2.0, 2.0], 1.0), disk([57.0, 55.0], [0.0, -1.0], 3.0)),
        (disk([200.0, 80.0], [-1.0, 2.5], 2.5), disk([195.0, 88.0], [0.4, -0.2], 0.5)),
        (disk([10.0, 10.0], [0.1, -2.0], 1.0), disk([12.0, 1.0], [-0.3, 1.2], 1.0)),
    ]
}

#[test]
fn momentum_is_conserved() {
    for (a, b) in oblique_cases() {
        let mut set = pair(a, b);
        let before = set.total_momentum();
        assert!(set.resolve(0, 1), "case should be approaching: {:?} {:?}", a, b);
        let after = set.total_momentum();
        let scale = before[0].abs().max(before[1].abs());
        assert!(close(before[0], after[0], scale), "{:?} -> {:?}", before, after);
        assert!(close(before[1], after[1], scale), "{:?} -> {:?}", before, after);
    }
}

#[test]
fn kinetic_energy_is_conserved() {
    for (a, b) in oblique_cases() {
        let mut set = pair(a, b);
        let before = set.kinetic_energy();
        assert!(set.resolve(0, 1));
        let after = set.kinetic_energy();
        assert!(close(before, after, before), "energy {} -> {}", before, after);
    }
}

#[test]
fn tangential_component_is_preserved() {
    // centers on a diagonal; velocity components along (-1, 1) must survive untouched
    let a = disk([100.0, 100.0], [2.0, 1.0], 1.0);
    let b = disk([104.0, 104.0], [-1.0, 0.5], 1.0);
    let tangent = [-1.0 / 2f64.sqrt(), 1.0 / 2f64.sqrt()];
    let along = |v: [f64; 2]| v[0] * tangent[0] + v[1] * tangent[1];

    let mut set = pair(a, b);
    assert!(set.resolve(0, 1));
    let (a2, b2) = (set.particles()[0], set.particles()[1]);
    assert!(close(along(a.vel), along(a2.vel), 1.0));
    assert!(close(along(b.vel), along(b2.vel), 1.0));
}

#[test]
fn head_on_equal_masses_exchange_velocities() {
    let mut set = pair(
        disk([100.0, 100.0], [1.0, 0.0], 1.0),
        disk([108.0, 100.0], [-1.0, 0.0], 1.0),
    );
    assert!(set.resolve(0, 1));
    let (a, b) = (set.particles()[0], set.particles()[1]);
    assert!(close(a.vel[0], -1.0, 1.0) && close(a.vel[1], 0.0, 1.0));
    assert!(close(b.vel[0], 1.0, 1.0) && close(b.vel[1], 0.0, 1.0));
}

#[test]
fn vertical_head_on_exchange() {
    let mut set = pair(
        disk([40.0, 40.0], [0.0, 2.0], 1.0),
        disk([40.0, 47.0], [0.0, -0.5], 1.0),
    );
    assert!(set.resolve(0, 1));
    let (a, b) = (set.particles()[0], set.particles()[1]);
    assert!(close(a.vel[1], -0.5, 1.0) && close(a.vel[0], 0.0, 1.0));
    assert!(close(b.vel[1], 2.0, 1.0) && close(b.vel[0], 0.0, 1.0));
}

#[test]
fn separating_pairs_are_untouched() {
    let a = disk([100.0, 100.0], [-1.0, 0.2], 1.0);
    let b = disk([106.0, 103.0], [0.5, 0.9], 2.0);
    let mut set = pair(a, b);
    assert!(!set.resolve(0, 1));
    assert_eq!(set.particles()[0], a);
    assert_eq!(set.particles()[1], b);
}

#[test]
fn color_infection_only_flows_one_way() {
    let a_color = Color::from_u32(0xcc99ffff);
    let b_color = Color::from_u32(0xff9933ff);
    let a = Particle::new([108.0, 100.0], [1.0, 0.0], 5.0, 1.0, a_color).unwrap();
    let b = Particle::new([100.0, 100.0], [2.0, 0.0], 5.0, 1.0, b_color).unwrap();
    let mut set = pair(a, b);
    assert!(set.resolve(0, 1));
    let (a2, b2) = (set.particles()[0], set.particles()[1]);
    assert!(close(a2.vel[0], 2.0, 1.0));
    assert!(close(b2.vel[0], 1.0, 1.0));
    assert_eq!(a2.color, b_color);
    assert_eq!(b2.color, b_color);
}

#[test]
fn hand_built_particles_are_checked() {
    let mut bad = disk([100.0, 100.0], [1.0, 0.0], 1.0);
    bad.mass = 0.0;
    let good = disk([108.0, 100.0], [-1.0, 0.0], 1.0);
    assert!(ParticleSet::from_particles(vec![good, bad], Color::WHITE).is_err());

    let mut shrunk = good;
    shrunk.radius = -5.0;
    assert!(ParticleSet::from_particles(vec![shrunk], Color::WHITE).is_err());
}

#[test]
fn oversized_config_is_an_error_not_a_panic() {
    let config = SimConfig::from_json(r#"{ "particle_count": 18446744073709551615 }"#).unwrap();
    assert!(ParticleSet::spawn(&config, 800.0, 600.0).is_err());
}

#[test]
fn tick_resolves_overlapping_pair() {
    let mut set = pair(
        disk([100.0, 100.0], [1.0, 0.0], 1.0),
        disk([108.0, 100.0], [-1.0, 0.0], 1.0),
    );
    let stats = set.tick(400.0, 400.0, &mut NullSurface);
    // particle 0 resolves the pair; by the time particle 1 scans, they are separating
    assert_eq!(stats.collisions, 1);
    assert_eq!(set.particles()[0].pos, [99.0, 100.0]);
    assert_eq!(set.particles()[1].pos, [109.0, 100.0]);
}

#[test]
fn corner_particle_flips_both_axes() {
    let mut set = ParticleSet::from_particles(
        vec![disk([3.0, 397.0], [-1.0, 1.0], 1.0)],
        Color::WHITE,
    ).unwrap();
    let stats = set.tick(400.0, 400.0, &mut NullSurface);
    assert_eq!(stats.reflections, 2);
    assert_eq!(set.particles()[0].vel, [1.0, -1.0]);
}

#[test]
fn edge_flips_once_even_when_both_sides_are_crossed() {
    // viewport narrower than the disk: both x checks are true, vx must flip exactly once
    let mut set = ParticleSet::from_particles(
        vec![disk([0.0, 50.0], [-1.0, 0.0], 1.0)],
        Color::WHITE,
    ).unwrap();
    let stats = set.tick(4.0, 100.0, &mut NullSurface);
    assert_eq!(stats.reflections, 1);
    assert_eq!(set.particles()[0].vel, [1.0, 0.0]);
}

#[test]
fn ticks_are_deterministic() {
    let config = SimConfig {
        particle_count: 150,
        seed: Some(2024),
        ..SimConfig::default()
    };
    let run = || {
        let mut set = ParticleSet::spawn(&config, 300.0, 200.0).unwrap();
        for _ in 0..200 {
            set.tick(300.0, 200.0, &mut NullSurface);
        }
        set
    };
    let (a, b) = (run(), run());
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn crowded_box_keeps_energy_and_stays_near_bounds() {
    let config = SimConfig {
        particle_count: 120,
        seed: Some(77),
        ..SimConfig::default()
    };
    let (width, height) = (250.0, 250.0);
    let mut set = ParticleSet::spawn(&config, width, height).unwrap();
    let e0 = set.kinetic_energy();
    let mut collisions = 0;
    for _ in 0..500 {
        collisions += set.tick(width, height, &mut NullSurface).collisions;
    }
    let e1 = set.kinetic_energy();
    assert!(collisions > 0);
    assert!(((e1 - e0) / e0).abs() < 1e-9, "energy drifted {} -> {}", e0, e1);
    // reflection flips velocity instead of clamping, so disks pressed against an edge
    // by their neighbors can sit partly outside it for a while
    let slack = 50.0;
    for p in set.particles() {
        assert!(p.pos[0] > -slack && p.pos[0] < width + slack, "{:?}", p.pos);
        assert!(p.pos[1] > -slack && p.pos[1] < height + slack, "{:?}", p.pos);
    }
}
