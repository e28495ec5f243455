//! Narrow phase: exact shape-pair tests
//!
//! Pairs are dispatched through a table indexed by both shape kinds. Only
//! the upper triangle holds routines; the lower triangle swaps the operands
//! and flips the normal, so every routine reports a normal pointing from its
//! first shape to its second. Same-kind pairs sit on the diagonal; they are
//! always evaluated in a fixed order of their geometry and mirrored when the
//! caller's order differs, so swapping the operands flips the normal for
//! every pair of distinct shapes.
//!
//! Capsules are tested as a sphere of the capsule radius at the capsule
//! center. Boxes tested against boxes use their rotated world bounds and
//! report the midpoint of the two centers as the contact point.

use std::cmp::Ordering;

use super::contact::Contact;
use super::shape::{ShapeKind, WorldShape};
use crate::foundation::math::{fallback_axis, Quat, Vec3, EPSILON};

type PairFn = fn(&WorldShape, &WorldShape) -> Option<Contact>;

#[derive(Clone, Copy)]
enum PairRoutine {
    Direct(PairFn),
    Mirrored,
}

const DISPATCH: [[PairRoutine; ShapeKind::COUNT]; ShapeKind::COUNT] = [
    // Sphere
    [
        PairRoutine::Direct(sphere_sphere),
        PairRoutine::Direct(sphere_box),
        PairRoutine::Direct(sphere_capsule),
    ],
    // Box
    [
        PairRoutine::Mirrored,
        PairRoutine::Direct(box_box),
        PairRoutine::Direct(box_capsule),
    ],
    // Capsule
    [
        PairRoutine::Mirrored,
        PairRoutine::Mirrored,
        PairRoutine::Direct(capsule_capsule),
    ],
];

/// Contact between two world shapes, or `None` when they are separated
///
/// Touching shapes yield a contact with zero penetration.
pub fn contact(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (row, column) = (a.kind().index(), b.kind().index());
    match DISPATCH[row][column] {
        PairRoutine::Direct(routine) if row == column && sorts_before(b, a) => {
            routine(b, a).map(Contact::mirrored)
        }
        PairRoutine::Direct(routine) => routine(a, b),
        PairRoutine::Mirrored => match DISPATCH[b.kind().index()][a.kind().index()] {
            PairRoutine::Direct(routine) => routine(b, a).map(Contact::mirrored),
            PairRoutine::Mirrored => None,
        },
    }
}

/// Geometry flattened into a sort key: center, size, then orientation
fn ordering_key(shape: &WorldShape) -> [f32; 10] {
    let (center, size, rotation) = match *shape {
        WorldShape::Sphere { center, radius } => (center, Vec3::new(radius, 0.0, 0.0), Quat::identity()),
        WorldShape::Box { center, half_extents, rotation } => (center, half_extents, rotation),
        WorldShape::Capsule { center, radius, height, rotation } => {
            (center, Vec3::new(radius, height, 0.0), rotation)
        }
    };
    let q = rotation.quaternion().coords;
    [center.x, center.y, center.z, size.x, size.y, size.z, q.x, q.y, q.z, q.w]
}

/// Whether `first` orders strictly before `second`
fn sorts_before(first: &WorldShape, second: &WorldShape) -> bool {
    ordering_key(first)
        .iter()
        .zip(ordering_key(second).iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|ordering| ordering.is_ne())
        == Some(Ordering::Less)
}

/// Center and radius used for sphere-like shapes
fn sphere_like(shape: &WorldShape) -> Option<(Vec3, f32)> {
    match *shape {
        WorldShape::Sphere { center, radius } | WorldShape::Capsule { center, radius, .. } => {
            Some((center, radius))
        }
        WorldShape::Box { .. } => None,
    }
}

fn box_parts(shape: &WorldShape) -> Option<(Vec3, Vec3, Quat)> {
    match *shape {
        WorldShape::Box { center, half_extents, rotation } => Some((center, half_extents, rotation)),
        _ => None,
    }
}

fn spheres(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> Option<Contact> {
    let offset = center_b - center_a;
    let distance = offset.magnitude();
    let radius_sum = radius_a + radius_b;
    if distance > radius_sum {
        return None;
    }
    
    let normal = if distance > EPSILON {
        offset / distance
    } else {
        fallback_axis()
    };
    
    Some(Contact {
        point: center_a + normal * radius_a,
        normal,
        penetration: radius_sum - distance,
    })
}

fn sphere_against_box(
    sphere_center: Vec3,
    radius: f32,
    box_center: Vec3,
    half_extents: Vec3,
    rotation: Quat,
) -> Option<Contact> {
    let local = rotation.inverse() * (sphere_center - box_center);
    let closest = Vec3::new(
        local.x.clamp(-half_extents.x, half_extents.x),
        local.y.clamp(-half_extents.y, half_extents.y),
        local.z.clamp(-half_extents.z, half_extents.z),
    );
    let diff = local - closest;
    let distance_squared = diff.magnitude_squared();
    if distance_squared > radius * radius {
        return None;
    }
    
    if distance_squared <= EPSILON * EPSILON {
        // Center inside the box (or on its surface): push out through the
        // face with the least penetration
        let mut axis = 0;
        let mut least = f32::INFINITY;
        for i in 0..3 {
            let depth = half_extents[i] - local[i].abs();
            if depth < least {
                least = depth;
                axis = i;
            }
        }
        let sign = if local[axis] >= 0.0 { 1.0 } else { -1.0 };
        
        let mut face_normal = Vec3::zeros();
        face_normal[axis] = sign;
        let mut face_point = local;
        face_point[axis] = sign * half_extents[axis];
        
        return Some(Contact {
            point: box_center + rotation * face_point,
            normal: -(rotation * face_normal),
            penetration: least.max(0.0) + radius,
        });
    }
    
    let distance = distance_squared.sqrt();
    Some(Contact {
        point: box_center + rotation * closest,
        normal: -(rotation * diff) / distance,
        penetration: radius - distance,
    })
}

fn sphere_sphere(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (center_a, radius_a) = sphere_like(a)?;
    let (center_b, radius_b) = sphere_like(b)?;
    spheres(center_a, radius_a, center_b, radius_b)
}

fn sphere_box(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (center, radius) = sphere_like(a)?;
    let (box_center, half_extents, rotation) = box_parts(b)?;
    sphere_against_box(center, radius, box_center, half_extents, rotation)
}

fn sphere_capsule(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    sphere_sphere(a, b)
}

fn box_box(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let bounds_a = a.bounds();
    let bounds_b = b.bounds();
    if !bounds_a.intersects(&bounds_b) {
        return None;
    }
    
    let overlap_min = bounds_a.min.sup(&bounds_b.min);
    let overlap_max = bounds_a.max.inf(&bounds_b.max);
    let overlap = overlap_max - overlap_min;
    
    let mut axis = 0;
    for i in 1..3 {
        if overlap[i] < overlap[axis] {
            axis = i;
        }
    }
    let offset = bounds_b.center() - bounds_a.center();
    let mut normal = Vec3::zeros();
    normal[axis] = if offset[axis] >= 0.0 { 1.0 } else { -1.0 };
    
    Some(Contact {
        point: (a.center() + b.center()) * 0.5,
        normal,
        penetration: overlap[axis].max(0.0),
    })
}

fn box_capsule(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    sphere_box(b, a).map(Contact::mirrored)
}

fn capsule_capsule(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    sphere_sphere(a, b)
}
