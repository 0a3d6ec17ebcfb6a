//! Cube visiting strategies.
//!
//! The exhaustive scan classifies every cube of the grid. The flood fill
//! starts from seed cubes near each skeleton and expands breadth-first
//! through the 26 neighbours of every cube the surface crosses, so its cost
//! follows the surface area rather than the grid volume.

use std::collections::VecDeque;

use isoblob_core::marching_cubes::is_empty_case;
use isoblob_core::{GridCoord, Point3, ScalarField, Skeleton};

use crate::config::SeedFallback;
use crate::pass::ExtractionPass;

/// Where a flood fill should look for the surface.
///
/// Built from a [`Skeleton`] for metaball fields; supply hints by hand for
/// arbitrary [`ScalarField`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedHint {
    /// A world position inside (or near) the surface component.
    pub position: Point3,
    /// Half-width of the box scanned by [`SeedFallback::BoundingBox`].
    pub support_radius: f32,
}

impl SeedHint {
    /// Create a hint.
    pub const fn new(position: Point3, support_radius: f32) -> Self {
        Self {
            position,
            support_radius,
        }
    }
}

impl From<&Skeleton> for SeedHint {
    fn from(skeleton: &Skeleton) -> Self {
        Self::new(skeleton.position, skeleton.support_radius())
    }
}

impl From<Skeleton> for SeedHint {
    fn from(skeleton: Skeleton) -> Self {
        Self::from(&skeleton)
    }
}

const AXIS_DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

const NEIGHBOUR_OFFSETS: [(i32, i32, i32); 26] = neighbour_offsets();

const fn neighbour_offsets() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut n = 0;
    let mut i = 0;
    while n < 27 {
        // 13 is the centre cell of the 3x3x3 block.
        if n != 13 {
            out[i] = ((n % 3) as i32 - 1, ((n / 3) % 3) as i32 - 1, (n / 9) as i32 - 1);
            i += 1;
        }
        n += 1;
    }
    out
}

/// Visit every cube, z-major then y then x.
pub(crate) fn exhaustive<F: ScalarField + ?Sized>(pass: &mut ExtractionPass<'_, F>) {
    let n = pass.frame().cubes_per_axis() as i32;
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                pass.process_cube(GridCoord::new(x, y, z));
            }
        }
    }
}

/// Seeded breadth-first fill, one hint after another.
///
/// The visited mask is shared across hints, so a fill that reaches an
/// already meshed component stops immediately.
pub(crate) fn flood_fill<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    hints: &[SeedHint],
    fallback: SeedFallback,
) {
    let mut queue = VecDeque::new();
    for (i, hint) in hints.iter().enumerate() {
        find_seeds(pass, hint, fallback, &mut queue);
        log::trace!("hint {}: {} seed cubes queued", i, queue.len());
        expand(pass, &mut queue);
        if fallback == SeedFallback::BoundingBox {
            scan_clipped_faces(pass, hint, &mut queue);
        }
    }
}

fn expand<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    queue: &mut VecDeque<GridCoord>,
) {
    while let Some(cube) = queue.pop_front() {
        if !pass.frame().contains_cube(cube) || pass.is_visited(cube) {
            continue;
        }
        if !pass.process_cube(cube) {
            continue;
        }
        for offset in NEIGHBOUR_OFFSETS {
            let next = cube.offset(offset);
            if pass.frame().contains_cube(next) && !pass.is_visited(next) {
                queue.push_back(next);
            }
        }
    }
}

fn find_seeds<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    hint: &SeedHint,
    fallback: SeedFallback,
    queue: &mut VecDeque<GridCoord>,
) {
    let start = pass.frame().to_grid(hint.position);
    let directions: &[(i32, i32, i32)] = match fallback {
        SeedFallback::Origin => &AXIS_DIRECTIONS[..1],
        SeedFallback::AxisSearch | SeedFallback::BoundingBox => &AXIS_DIRECTIONS,
    };

    for &dir in directions {
        if let Some(seed) = march(pass, start, dir) {
            log::trace!("seed {:?} found marching {:?} from {:?}", seed, dir, start);
            pass.note_seed(false);
            queue.push_back(seed);
        }
    }
    if !queue.is_empty() {
        return;
    }

    match fallback {
        SeedFallback::Origin | SeedFallback::AxisSearch => {
            log::warn!(
                "no surface crossing found from {:?}, seeding the grid origin cube",
                hint.position
            );
            pass.note_seed(true);
            queue.push_back(GridCoord::new(0, 0, 0));
        }
        SeedFallback::BoundingBox => scan_support_box(pass, hint, queue),
    }
}

/// Walk from `start` along `dir` and return the cube holding the first
/// lattice edge where the sample turns from positive to non-positive.
///
/// Points outside the grid are stepped over, so a start outside the grid can
/// still march into it.
fn march<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    start: GridCoord,
    dir: (i32, i32, i32),
) -> Option<GridCoord> {
    // A start further out than one step past the border visits the same points.
    let size = pass.frame().size as i32;
    let [x, y, z] = start.as_array().map(|c| c.clamp(-1, size));

    let mut inside = false;
    let mut q = GridCoord::new(x, y, z);
    for _ in 0..=size + 1 {
        match pass.try_sample(q) {
            Some(sample) if sample > 0.0 => inside = true,
            Some(_) if inside => {
                let back = q.offset((-dir.0, -dir.1, -dir.2));
                let base = GridCoord::new(q.x.min(back.x), q.y.min(back.y), q.z.min(back.z));
                return Some(pass.frame().clamp_cube(base));
            }
            Some(_) => {}
            None => inside = false,
        }
        q = q.offset(dir);
    }
    None
}

/// Queue every crossed cube inside the hint's support box.
fn scan_support_box<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    hint: &SeedHint,
    queue: &mut VecDeque<GridCoord>,
) {
    let frame = *pass.frame();
    if frame.cubes_per_axis() == 0 {
        return;
    }
    let reach = Point3::splat(hint.support_radius);
    let lo = frame.clamp_cube(frame.to_grid(hint.position - reach));
    let hi = frame.clamp_cube(frame.to_grid(hint.position + reach));

    let before = queue.len();
    for z in lo.z..=hi.z {
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let cube = GridCoord::new(x, y, z);
                if !is_empty_case(pass.classify(cube)) {
                    pass.note_seed(true);
                    queue.push_back(cube);
                }
            }
        }
    }
    if queue.len() == before {
        log::trace!("support box around {:?} holds no surface", hint.position);
    }
}

/// Fill from every crossed cube the pass has not reached on the grid faces
/// that cut the hint's support box.
///
/// The grid boundary can split one shell into pieces that only connect
/// outside the grid. Each such piece crosses a face inside the box.
fn scan_clipped_faces<F: ScalarField + ?Sized>(
    pass: &mut ExtractionPass<'_, F>,
    hint: &SeedHint,
    queue: &mut VecDeque<GridCoord>,
) {
    let frame = *pass.frame();
    let last = frame.cubes_per_axis() as i32 - 1;
    if last < 0 {
        return;
    }
    let reach = Point3::splat(hint.support_radius);
    let box_lo = ((hint.position - reach - frame.base_point) / frame.step).as_array();
    let box_hi = ((hint.position + reach - frame.base_point) / frame.step).as_array();
    let max_point = (frame.size - 1) as f32;
    if (0..3).any(|axis| box_hi[axis] < 0.0 || box_lo[axis] > max_point) {
        return;
    }

    // One cube of slack for the rounding in `to_grid`. Clamp first so a huge
    // radius cannot overflow the offset.
    let widen = |point: Point3, by: i32| {
        let cube = frame.clamp_cube(frame.to_grid(point)).offset((by, by, by));
        frame.clamp_cube(cube).as_array()
    };
    let lo = widen(hint.position - reach, -1);
    let hi = widen(hint.position + reach, 1);

    for axis in 0..3 {
        let mut layers = Vec::with_capacity(2);
        if box_lo[axis] <= 0.0 {
            layers.push(0);
        }
        if box_hi[axis] >= max_point && !layers.contains(&last) {
            layers.push(last);
        }
        for layer in layers {
            let mut lo = lo;
            let mut hi = hi;
            lo[axis] = layer;
            hi[axis] = layer;
            for z in lo[2]..=hi[2] {
                for y in lo[1]..=hi[1] {
                    for x in lo[0]..=hi[0] {
                        let cube = GridCoord::new(x, y, z);
                        if pass.is_visited(cube) || is_empty_case(pass.classify(cube)) {
                            continue;
                        }
                        log::trace!("clipped surface piece found at {:?}", cube);
                        pass.note_seed(true);
                        queue.push_back(cube);
                        expand(pass, queue);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractionConfig, GridConfig};
    use isoblob_core::FnField;

    fn config(size: u32) -> ExtractionConfig {
        ExtractionConfig::new(GridConfig::new(size, 0.1, Point3::splat(0.0))).with_iso_level(0.0)
    }

    fn sphere(center: Point3, radius: f32) -> FnField<impl Fn(Point3) -> f32> {
        FnField(move |p: Point3| radius - (p - center).length())
    }

    #[test]
    fn test_neighbour_offsets() {
        assert_eq!(NEIGHBOUR_OFFSETS.len(), 26);
        assert!(!NEIGHBOUR_OFFSETS.contains(&(0, 0, 0)));
        for (i, a) in NEIGHBOUR_OFFSETS.iter().enumerate() {
            assert!([a.0, a.1, a.2].iter().all(|c| (-1..=1).contains(c)));
            assert!(!NEIGHBOUR_OFFSETS[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_march_finds_crossing_cube() {
        let field = sphere(Point3::splat(0.0), 0.25);
        let mut pass = ExtractionPass::new(&field, &config(16));
        let start = pass.frame().to_grid(Point3::splat(0.0));

        for dir in AXIS_DIRECTIONS {
            let seed = march(&mut pass, start, dir).expect("sphere is inside the grid");
            assert!(pass.frame().contains_cube(seed));
            let case = pass.classify(seed);
            assert!(!is_empty_case(case), "{:?}", dir);
        }
    }

    #[test]
    fn test_march_from_outside_grid() {
        let field = sphere(Point3::new(0.6, 0.0, 0.0), 0.25);
        let mut pass = ExtractionPass::new(&field, &config(16));
        let start = pass.frame().to_grid(Point3::new(2.0, 0.0, 0.0));
        assert!(!pass.frame().contains_point(start));

        let seed = march(&mut pass, start, (-1, 0, 0)).expect("march enters the grid");
        assert!(!is_empty_case(pass.classify(seed)));
    }

    #[test]
    fn test_march_misses_field_without_positive_start() {
        let field = FnField(|_: Point3| -1.0);
        let mut pass = ExtractionPass::new(&field, &config(8));
        assert_eq!(march(&mut pass, GridCoord::new(3, 3, 3), (1, 0, 0)), None);
    }

    #[test]
    fn test_exhaustive_visits_every_cube() {
        let field = sphere(Point3::splat(0.0), 0.25);
        let mut pass = ExtractionPass::new(&field, &config(8));
        exhaustive(&mut pass);
        let (mesh, stats) = pass.finish();
        assert_eq!(stats.cubes_visited, 7 * 7 * 7);
        assert_eq!(stats.evaluations, 8 * 8 * 8);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_flood_fill_visits_fewer_cubes() {
        let field = sphere(Point3::splat(0.0), 0.25);
        let hint = SeedHint::new(Point3::splat(0.0), 0.3);
        let mut pass = ExtractionPass::new(&field, &config(24));
        flood_fill(&mut pass, &[hint], SeedFallback::AxisSearch);
        let (mesh, stats) = pass.finish();

        assert!(mesh.is_closed());
        assert!(stats.cubes_visited < 23 * 23 * 23);
        assert_eq!(stats.seeds, 6);
        assert_eq!(stats.fallback_seeds, 0);
    }

    #[test]
    fn test_origin_fallback_seeds_origin_cube() {
        let field = FnField(|_: Point3| -1.0);
        let hint = SeedHint::new(Point3::splat(0.0), 0.5);
        let mut pass = ExtractionPass::new(&field, &config(8));
        flood_fill(&mut pass, &[hint], SeedFallback::Origin);
        let (mesh, stats) = pass.finish();

        assert!(mesh.is_empty());
        assert_eq!(stats.seeds, 1);
        assert_eq!(stats.fallback_seeds, 1);
        assert_eq!(stats.cubes_visited, 1);
    }

    #[test]
    fn test_face_scan_skips_reached_surface() {
        // Sphere centred past the +x face. The grid keeps a single cap, which
        // the -x march already reaches.
        let field = sphere(Point3::new(0.9, 0.0, 0.0), 0.4);
        let hint = SeedHint::new(Point3::new(0.9, 0.0, 0.0), 0.5);

        let mut boxed = ExtractionPass::new(&field, &config(16));
        flood_fill(&mut boxed, &[hint], SeedFallback::BoundingBox);
        let (mesh, stats) = boxed.finish();

        let mut all = ExtractionPass::new(&field, &config(16));
        exhaustive(&mut all);
        let (expected, _) = all.finish();

        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangle_count(), expected.triangle_count());
        assert_eq!(stats.fallback_seeds, 0);
    }

    #[test]
    fn test_bounding_box_finds_off_axis_surface() {
        // Axis lines through the hint miss the small sphere at the origin.
        let field = sphere(Point3::splat(0.0), 0.2);
        let hint = SeedHint::new(Point3::new(0.35, 0.35, 0.0), 0.6);

        let mut axis = ExtractionPass::new(&field, &config(20));
        flood_fill(&mut axis, &[hint], SeedFallback::AxisSearch);
        assert!(axis.finish().0.is_empty());

        let mut boxed = ExtractionPass::new(&field, &config(20));
        flood_fill(&mut boxed, &[hint], SeedFallback::BoundingBox);
        let (mesh, stats) = boxed.finish();
        assert!(mesh.is_closed());
        assert!(stats.fallback_seeds > 0);
    }
}
