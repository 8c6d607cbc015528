/// Orthonormal frame with the z axis along a given world-space direction.
#[derive(Copy, Clone)]
pub struct Coordinate {
    local_to_world: glam::Mat3A,
    world_to_local: glam::Mat3A,
}

impl Coordinate {
    pub fn from_z(z_world: glam::Vec3A) -> Self {
        let sign = if z_world.z >= 0.0 { 1.0 } else { -1.0 };
        let a = -1.0 / (sign + z_world.z);
        let b = z_world.x * z_world.y * a;
        let x_world = glam::Vec3A::new(
            1.0 + sign * z_world.x * z_world.x * a,
            sign * b,
            -sign * z_world.x,
        );
        let y_world = glam::Vec3A::new(b, sign + z_world.y * z_world.y * a, -z_world.y);

        let local_to_world = glam::Mat3A::from_cols(x_world, y_world, z_world);
        let world_to_local = local_to_world.transpose();
        Self {
            local_to_world,
            world_to_local,
        }
    }

    pub fn to_local(&self, world: glam::Vec3A) -> glam::Vec3A {
        self.world_to_local * world
    }

    pub fn to_world(&self, local: glam::Vec3A) -> glam::Vec3A {
        self.local_to_world * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_orthonormal() {
        for normal in [
            glam::Vec3A::Y,
            -glam::Vec3A::Z,
            glam::Vec3A::new(1.0, 2.0, -3.0).normalize(),
        ] {
            let coord = Coordinate::from_z(normal);
            let x = coord.to_world(glam::Vec3A::X);
            let y = coord.to_world(glam::Vec3A::Y);
            let z = coord.to_world(glam::Vec3A::Z);

            assert!((z - normal).length() < 1e-5);
            assert!(x.dot(y).abs() < 1e-5);
            assert!(x.dot(z).abs() < 1e-5);
            assert!((x.length() - 1.0).abs() < 1e-5);
            assert!((y.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn round_trip_preserves_vectors() {
        let coord = Coordinate::from_z(glam::Vec3A::new(0.3, -0.5, 0.8).normalize());
        let v = glam::Vec3A::new(0.1, 2.0, -0.7);
        let back = coord.to_world(coord.to_local(v));
        assert!((back - v).length() < 1e-5);
    }
}
