// Simple particle struct to keep track of individual position, velocity, size and opacity.
// Everything but the position is fixed once the particle is created.

use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, opacity: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            opacity,
        }
    }

    /// Spawns a particle somewhere inside a `width` x `height` surface.
    ///
    /// Radius falls in `[min_radius, max_radius)`, opacity in
    /// `[min_opacity, 1.0)` and each velocity component in
    /// `[-max_speed, max_speed)`.
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f64,
        height: f64,
        spawn: &SpawnRanges,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let radius = rng.gen::<f64>() * (spawn.max_radius - spawn.min_radius) + spawn.min_radius;
        let vel_x = rng.gen::<f64>() * spawn.max_speed * 2.0 - spawn.max_speed;
        let vel_y = rng.gen::<f64>() * spawn.max_speed * 2.0 - spawn.max_speed;
        let opacity = rng.gen::<f64>() * (1.0 - spawn.min_opacity) + spawn.min_opacity;
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, opacity)
    }

    // Moves by one frame's worth of velocity. A particle leaving an edge is
    // placed exactly on the opposite edge, the overshoot is dropped.
    pub fn step(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];

        if self.pos[0] < 0.0 {
            self.pos[0] = width;
        }
        if self.pos[0] > width {
            self.pos[0] = 0.0;
        }
        if self.pos[1] < 0.0 {
            self.pos[1] = height;
        }
        if self.pos[1] > height {
            self.pos[1] = 0.0;
        }
    }

    pub fn distance_to(&self, other: [f64; 2]) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other))
    }
}

/// Ranges random particles are drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnRanges {
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_speed: f64,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        SpawnRanges {
            min_radius: 2.0,
            max_radius: 5.0,
            min_opacity: 0.3,
            max_speed: 0.75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_particles_stay_in_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let spawn = SpawnRanges::default();
        for _ in 0..1000 {
            let p = Particle::random(&mut rng, 640.0, 480.0, &spawn);
            assert!(p.radius >= 2.0 && p.radius < 5.0);
            assert!(p.opacity >= 0.3 && p.opacity < 1.0);
            assert!(p.vel[0] >= -0.75 && p.vel[0] < 0.75);
            assert!(p.vel[1] >= -0.75 && p.vel[1] < 0.75);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
        }
    }

    #[test]
    fn zero_area_surface_spawns_at_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::random(&mut rng, 0.0, 0.0, &SpawnRanges::default());
        assert_eq!(p.pos, [0.0, 0.0]);
    }

    #[test]
    fn step_inside_bounds_moves_by_velocity() {
        let mut p = Particle::new(100.0, 200.0, 0.5, -0.25, 3.0, 0.5);
        p.step(800.0, 600.0);
        assert_eq!(p.pos, [100.5, 199.75]);
    }

    #[test]
    fn leaving_left_or_top_lands_on_far_edge() {
        let mut p = Particle::new(0.2, 0.1, -0.5, -0.5, 3.0, 0.5);
        p.step(800.0, 600.0);
        assert_eq!(p.pos, [800.0, 600.0]);
    }

    #[test]
    fn leaving_right_or_bottom_lands_on_zero() {
        let mut p = Particle::new(799.9, 599.9, 0.5, 0.5, 3.0, 0.5);
        p.step(800.0, 600.0);
        assert_eq!(p.pos, [0.0, 0.0]);
    }

    #[test]
    fn sitting_on_the_edge_does_not_wrap() {
        let mut p = Particle::new(800.0, 600.0, 0.0, 0.0, 3.0, 0.5);
        p.step(800.0, 600.0);
        assert_eq!(p.pos, [800.0, 600.0]);
    }

    #[test]
    fn fixed_attributes_never_change() {
        let mut p = Particle::new(10.0, 10.0, -0.7, 0.7, 4.5, 0.9);
        for _ in 0..5000 {
            p.step(50.0, 50.0);
        }
        assert_eq!(p.vel, [-0.7, 0.7]);
        assert_eq!(p.radius, 4.5);
        assert_eq!(p.opacity, 0.9);
    }

    #[test]
    fn distance_is_euclidean() {
        let p = Particle::new(100.0, 100.0, 0.0, 0.0, 2.0, 1.0);
        assert_eq!(p.distance_to([103.0, 104.0]), 5.0);
    }
}
