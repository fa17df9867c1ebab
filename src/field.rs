// Ambient background: a fixed set of drifting particles, with faint lines
// drawn between every pair that comes close enough.

use crate::config::{FieldConfig, Linking};
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

/// Opacity of the line between two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
pub fn link_opacity(distance: f64, link_distance: f64, max_opacity: f64) -> Option<f64> {
    if distance < link_distance {
        Some(max_opacity * (1.0 - distance / link_distance))
    } else {
        None
    }
}

pub struct ParticleField<S: Surface> {
    surface: S,
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl<S: Surface> ParticleField<S> {
    /// Sizes the surface and scatters `config.particle_count` random
    /// particles over it.
    pub fn initialize<R: Rng>(
        surface: S,
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let spawn = config.spawn_ranges();
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(rng, width as f64, height as f64, &spawn));
        }
        log::debug!(
            "particle field {}x{} with {} particles",
            width,
            height,
            particles.len()
        );
        ParticleField::from_particles(surface, width, height, config, particles)
    }

    pub fn from_particles(
        mut surface: S,
        width: u32,
        height: u32,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Self {
        surface.set_size(width, height);
        ParticleField {
            surface,
            width,
            height,
            particles,
            config,
        }
    }

    // Particles keep their positions; anything now out of bounds wraps on
    // its next step.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.surface.set_size(width, height);
    }

    pub fn advance_frame(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;
        self.surface.clear_rect(0.0, 0.0, width, height);

        match self.config.linking {
            Linking::FrameConsistent => {
                for particle in &mut self.particles {
                    particle.step(width, height);
                }
                for i in 0..self.particles.len() {
                    let from = self.particles[i];
                    for j in (i + 1)..self.particles.len() {
                        let to = self.particles[j].pos;
                        self.link(&from, to);
                    }
                }
                for i in 0..self.particles.len() {
                    let particle = self.particles[i];
                    self.draw_particle(&particle);
                }
            }
            Linking::InPlace => {
                for i in 0..self.particles.len() {
                    self.particles[i].step(width, height);
                    let from = self.particles[i];
                    for j in 0..self.particles.len() {
                        let to = self.particles[j].pos;
                        self.link(&from, to);
                    }
                    self.draw_particle(&from);
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn link(&mut self, from: &Particle, to: [f64; 2]) {
        let distance = from.distance_to(to);
        if let Some(alpha) = link_opacity(distance, self.config.link_distance, self.config.link_opacity) {
            self.surface
                .stroke_line(from.pos, to, self.config.link_width, self.config.color, alpha);
        }
    }

    fn draw_particle(&mut self, particle: &Particle) {
        self.surface
            .fill_circle(particle.pos, particle.radius, self.config.color, particle.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetSize(u32, u32),
        Clear([f64; 4]),
        Circle { center: [f64; 2], radius: f64, alpha: f64 },
        Line { from: [f64; 2], to: [f64; 2], width: f64, alpha: f64 },
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn lines(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Line { .. }))
                .collect()
        }

        fn circles(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Circle { .. }))
                .count()
        }
    }

    impl Surface for Recorder {
        fn set_size(&mut self, width: u32, height: u32) {
            self.calls.push(Call::SetSize(width, height));
        }

        fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.calls.push(Call::Clear([x, y, width, height]));
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
            assert_eq!(color, Color::default());
            self.calls.push(Call::Circle {
                center,
                radius,
                alpha,
            });
        }

        fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], line_width: f64, color: Color, alpha: f64) {
            assert_eq!(color, Color::default());
            self.calls.push(Call::Line {
                from,
                to,
                width: line_width,
                alpha,
            });
        }
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 3.0, 0.8)
    }

    fn field_of(particles: Vec<Particle>, linking: Linking) -> ParticleField<Recorder> {
        let config = FieldConfig {
            linking,
            ..FieldConfig::default()
        };
        ParticleField::from_particles(Recorder::default(), 1000, 1000, config, particles)
    }

    #[test]
    fn opacity_fades_linearly_to_the_threshold() {
        assert_eq!(link_opacity(0.0, 150.0, 0.15), Some(0.15));
        assert_eq!(link_opacity(150.0, 150.0, 0.15), None);
        assert_eq!(link_opacity(200.0, 150.0, 0.15), None);
        let faint = link_opacity(149.999, 150.0, 0.15).unwrap();
        assert!((faint - 0.0000067).abs() < 1e-7);
        let mid = link_opacity(75.0, 150.0, 0.15).unwrap();
        assert!((mid - 0.075).abs() < 1e-12);
    }

    #[test]
    fn initialize_scatters_seventy_particles() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::initialize(Recorder::default(), 800, 600, FieldConfig::default(), &mut rng);
        assert_eq!(field.particles().len(), 70);
        assert_eq!(field.size(), (800, 600));
        assert_eq!(field.surface().calls, vec![Call::SetSize(800, 600)]);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.radius >= 2.0 && p.radius < 5.0);
            assert!(p.opacity >= 0.3 && p.opacity < 1.0);
            assert!(p.vel[0].abs() <= 0.75 && p.vel[1].abs() <= 0.75);
        }
    }

    #[test]
    fn zero_area_field_is_degenerate_but_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::initialize(Recorder::default(), 0, 0, FieldConfig::default(), &mut rng);
        assert!(field.particles().iter().all(|p| p.pos == [0.0, 0.0]));
        field.advance_frame();
        assert_eq!(field.particles().len(), 70);
    }

    #[test]
    fn population_and_bounds_hold_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ParticleField::initialize(Recorder::default(), 320, 240, FieldConfig::default(), &mut rng);
        for _ in 0..10_000 {
            field.surface.calls.clear();
            field.advance_frame();
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0);
            }
        }
        assert_eq!(field.particles().len(), 70);
        assert_eq!(field.surface().circles(), 70);
    }

    #[test]
    fn frame_starts_with_a_full_clear() {
        let mut field = field_of(vec![still(1.0, 1.0)], Linking::FrameConsistent);
        field.surface.calls.clear();
        field.advance_frame();
        assert_eq!(field.surface().calls[0], Call::Clear([0.0, 0.0, 1000.0, 1000.0]));
    }

    #[test]
    fn close_pair_is_linked_once_when_frame_consistent() {
        let mut field = field_of(vec![still(100.0, 100.0), still(100.0, 110.0)], Linking::FrameConsistent);
        field.surface.calls.clear();
        field.advance_frame();

        let lines = field.surface().lines();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            Call::Line { from, to, width, alpha } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [100.0, 110.0]);
                assert_eq!(*width, 1.0);
                assert!((alpha - 0.15 * (1.0 - 10.0 / 150.0)).abs() < 1e-12);
                assert!((alpha - 0.14).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
        assert_eq!(field.surface().circles(), 2);
    }

    #[test]
    fn in_place_links_every_ordered_pair_and_itself() {
        let mut field = field_of(vec![still(100.0, 100.0), still(100.0, 110.0)], Linking::InPlace);
        field.surface.calls.clear();
        field.advance_frame();

        let alphas: Vec<f64> = field
            .surface()
            .lines()
            .iter()
            .map(|c| match c {
                Call::Line { alpha, .. } => *alpha,
                _ => unreachable!(),
            })
            .collect();
        // self, other, other, self
        assert_eq!(alphas.len(), 4);
        assert_eq!(alphas[0], 0.15);
        assert!((alphas[1] - 0.14).abs() < 1e-9);
        assert!((alphas[2] - 0.14).abs() < 1e-9);
        assert_eq!(alphas[3], 0.15);
    }

    #[test]
    fn in_place_sees_stale_positions_of_later_particles() {
        let moving = Particle::new(100.0, 110.0, 0.0, 1.0, 3.0, 0.8);
        let mut field = field_of(vec![still(100.0, 100.0), moving], Linking::InPlace);
        field.surface.calls.clear();
        field.advance_frame();

        let segments: Vec<([f64; 2], [f64; 2])> = field
            .surface()
            .lines()
            .iter()
            .map(|c| match c {
                Call::Line { from, to, .. } => (*from, *to),
                _ => unreachable!(),
            })
            .collect();
        assert!(segments.contains(&([100.0, 100.0], [100.0, 110.0])));
        assert!(segments.contains(&([100.0, 111.0], [100.0, 100.0])));
    }

    #[test]
    fn frame_consistent_links_updated_positions() {
        let moving = Particle::new(100.0, 110.0, 0.0, 1.0, 3.0, 0.8);
        let mut field = field_of(vec![still(100.0, 100.0), moving], Linking::FrameConsistent);
        field.surface.calls.clear();
        field.advance_frame();

        match field.surface().lines()[..] {
            [Call::Line { from, to, .. }] => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [100.0, 111.0]);
            }
            _ => panic!("expected exactly one line"),
        }
    }

    #[test]
    fn pair_exactly_at_threshold_is_not_linked() {
        for linking in [Linking::FrameConsistent, Linking::InPlace] {
            let mut field = field_of(vec![still(100.0, 100.0), still(250.0, 100.0)], linking);
            field.surface.calls.clear();
            field.advance_frame();
            assert!(field
                .surface()
                .lines()
                .iter()
                .all(|c| matches!(c, Call::Line { from, to, .. } if from == to)));
        }
    }

    #[test]
    fn particles_are_drawn_with_their_own_opacity() {
        let p = Particle::new(10.0, 20.0, 0.0, 0.0, 4.0, 0.35);
        let mut field = field_of(vec![p], Linking::FrameConsistent);
        field.surface.calls.clear();
        field.advance_frame();
        assert_eq!(
            field.surface().calls[1],
            Call::Circle {
                center: [10.0, 20.0],
                radius: 4.0,
                alpha: 0.35
            }
        );
    }

    #[test]
    fn unmoved_particle_steps_by_its_velocity() {
        let p = Particle::new(500.0, 500.0, 0.5, -0.25, 3.0, 0.5);
        let mut field = field_of(vec![p], Linking::FrameConsistent);
        field.advance_frame();
        assert_eq!(field.particles()[0].pos, [500.5, 499.75]);
    }

    #[test]
    fn resize_changes_bounds_but_not_positions() {
        let p = Particle::new(700.0, 500.0, 0.25, 0.25, 3.0, 0.5);
        let mut field = field_of(vec![p, still(10.0, 10.0)], Linking::FrameConsistent);
        let before: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();

        field.on_viewport_resize(800, 600);
        field.on_viewport_resize(400, 300);
        let after: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(field.size(), (400, 300));

        field.surface.calls.clear();
        field.advance_frame();
        assert_eq!(field.surface().calls[0], Call::Clear([0.0, 0.0, 400.0, 300.0]));
        // out of the new bounds, wraps on its next step
        assert_eq!(field.particles()[0].pos, [0.0, 0.0]);
        assert_eq!(field.particles()[1].pos, [10.0, 10.0]);
    }

    #[test]
    fn resize_resets_the_surface() {
        let mut field = field_of(vec![], Linking::FrameConsistent);
        field.on_viewport_resize(1280, 720);
        assert_eq!(
            field.surface().calls,
            vec![Call::SetSize(1000, 1000), Call::SetSize(1280, 720)]
        );
    }
}
