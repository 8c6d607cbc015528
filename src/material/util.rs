/// Mirror reflection of `v` about the unit normal `n`.
pub fn reflect(v: glam::Vec3A, n: glam::Vec3A) -> glam::Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Snell refraction of the unit direction `v` through a surface with unit
/// normal `n`. Returns `None` on total internal reflection.
pub fn refract(v: glam::Vec3A, n: glam::Vec3A, ni_over_nt: f32) -> Option<glam::Vec3A> {
    let dt = v.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (v - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation of the Fresnel reflectance for dielectrics.
pub fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
