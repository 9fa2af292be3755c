//! C bindings for the Poisk-More drift and search core
//!
//! Plain values (`PoiskPosition`, `PoiskReading`, `PoiskDrift`) cross the
//! boundary by value. Generated shapes and fields are returned as opaque
//! handles that the caller frees with the matching `*_free` function.
//!
//! Every fallible function returns a [`PoiskErrorCode`]; the message for the
//! last failure on the calling thread is available from
//! [`poisk_get_last_error`].

mod error;
mod helpers;

pub use error::{poisk_get_last_error, poisk_get_last_error_code, PoiskErrorCode};

use error::FfiError;
use helpers::{slice_from_raw, track_error, write_boxed, write_result};
use poisk_core::{
    estimate_drift, generate_by_name, initial_bearing, vector_mean, Degrees, Extent, Hours,
    Meters, MetersPerSecond, Position, ProbabilityGrid, SampledField, SearchParams,
    VectorReading,
};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::str::Utf8Error;

/// Geographic position in degrees.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiskPosition {
    pub lat: f64,
    pub lon: f64,
}

impl PoiskPosition {
    fn to_core(self) -> Result<Position, FfiError> {
        Position::new(self.lat, self.lon).map_err(FfiError::from)
    }
}

impl From<Position> for PoiskPosition {
    fn from(p: Position) -> Self {
        Self {
            lat: p.lat(),
            lon: p.lon(),
        }
    }
}

/// Wind or current reading: compass bearing the medium carries toward, and
/// speed in metres per second.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiskReading {
    pub direction_deg: f64,
    pub speed_mps: f64,
}

impl From<PoiskReading> for VectorReading {
    fn from(r: PoiskReading) -> Self {
        VectorReading::new(
            Degrees::new(r.direction_deg),
            MetersPerSecond::new(r.speed_mps),
        )
    }
}

impl From<VectorReading> for PoiskReading {
    fn from(r: VectorReading) -> Self {
        Self {
            direction_deg: *r.direction,
            speed_mps: *r.speed,
        }
    }
}

/// Result of a drift estimate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiskDrift {
    /// Drifted datum
    pub position: PoiskPosition,
    /// Displacement east, metres
    pub east_m: f64,
    /// Displacement north, metres
    pub north_m: f64,
    /// Total displacement, metres
    pub distance_m: f64,
    /// Compass bearing of the displacement, degrees
    pub set_deg: f64,
}

/// Unit of a search-pattern extent.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiskExtentUnit {
    /// Raw coordinate degrees
    Degrees = 0,
    /// Metres, projected through the local frame
    Meters = 1,
}

/// Parameters for `poisk_search_geometry_new`. Each method reads only the
/// fields it needs; radius and spacing share `unit`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiskSearchParams {
    pub unit: PoiskExtentUnit,
    pub radius: f64,
    pub legs: u32,
    pub sectors: u32,
    pub orientation_deg: f64,
    pub spacing: f64,
    pub tracks_per_side: u32,
    pub sweep_bearing_deg: f64,
}

impl PoiskSearchParams {
    fn extent(&self, value: f64) -> Extent {
        match self.unit {
            PoiskExtentUnit::Degrees => Extent::Degrees(value),
            PoiskExtentUnit::Meters => Extent::Meters(Meters::new(value)),
        }
    }
}

/// Sampled point with its weight in [0, 1].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiskWeightedPoint {
    pub position: PoiskPosition,
    pub weight: f64,
}

/// Vertices of a generated search geometry, in drawing order.
pub struct PoiskGeometry {
    vertices: Vec<PoiskPosition>,
    closed: bool,
}

/// Dense probability grid (row-major, row 0 southernmost).
pub struct PoiskProbabilityGrid {
    grid: ProbabilityGrid,
}

/// Sampled probability field.
pub struct PoiskSampledField {
    seed: u64,
    points: Vec<PoiskWeightedPoint>,
}

/// Initial compass bearing from `from` to `to`, in [0, 360).
///
/// Coordinates are not range-checked. Identical points and any NaN
/// coordinate give a bearing of 0.
///
/// # Safety
/// `out_deg` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_bearing(
    from: PoiskPosition,
    to: PoiskPosition,
    out_deg: *mut f64,
) -> PoiskErrorCode {
    if out_deg.is_null() {
        return track_error(&FfiError::null_pointer("out_deg"));
    }
    let deg = initial_bearing(from.lat, from.lon, to.lat, to.lon);
    unsafe { write_result(Ok(*deg), out_deg) }
}

/// Vector average of `len` readings. An empty array yields a calm reading.
///
/// # Safety
/// - `readings` must point to `len` readings, or be null with `len == 0`.
/// - `out_mean` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_vector_mean(
    readings: *const PoiskReading,
    len: usize,
    out_mean: *mut PoiskReading,
) -> PoiskErrorCode {
    if out_mean.is_null() {
        return track_error(&FfiError::null_pointer("out_mean"));
    }
    let result = unsafe { slice_from_raw(readings, len, "readings") }.map(|raw| {
        let readings: Vec<VectorReading> = raw.iter().copied().map(Into::into).collect();
        PoiskReading::from(vector_mean(&readings))
    });
    unsafe { write_result(result, out_mean) }
}

/// Drift of an object from `lkp` under wind and current for `elapsed_hours`.
///
/// Returns
/// - `Ok` with `out_drift` filled
/// - `InvalidParameter` for bad coordinates, readings or a non-positive time
/// - `DriftFailed` at a pole
///
/// # Safety
/// `out_drift` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_estimate_drift(
    lkp: PoiskPosition,
    wind: PoiskReading,
    current: PoiskReading,
    elapsed_hours: f64,
    out_drift: *mut PoiskDrift,
) -> PoiskErrorCode {
    if out_drift.is_null() {
        return track_error(&FfiError::null_pointer("out_drift"));
    }
    let result = drift_of(lkp, wind, current, elapsed_hours);
    unsafe { write_result(result, out_drift) }
}

/// Generate a search geometry by method name (`expanding_square`, `sector`,
/// `parallel_sweep` or `convex_hull`).
///
/// The convex hull reads `points`/`points_len` and ignores `center`; the
/// other methods ignore the points.
///
/// # Safety
/// - `method` must be a valid null-terminated string.
/// - `params` must be a valid, non-null pointer.
/// - `points` must point to `points_len` positions, or be null with `points_len == 0`.
/// - `out_geometry` must be non-null; on success the caller owns the handle
///   and MUST release it with `poisk_search_geometry_free`.
#[no_mangle]
pub unsafe extern "C" fn poisk_search_geometry_new(
    method: *const c_char,
    center: PoiskPosition,
    params: *const PoiskSearchParams,
    points: *const PoiskPosition,
    points_len: usize,
    out_geometry: *mut *mut PoiskGeometry,
) -> PoiskErrorCode {
    if out_geometry.is_null() {
        return track_error(&FfiError::null_pointer("out_geometry"));
    }
    if method.is_null() {
        return unsafe { write_boxed(Err(FfiError::null_pointer("method")), out_geometry) };
    }
    if params.is_null() {
        return unsafe { write_boxed(Err(FfiError::null_pointer("params")), out_geometry) };
    }

    let name = unsafe { CStr::from_ptr(method) }.to_str();
    let raw = unsafe { *params };
    let points = unsafe { slice_from_raw(points, points_len, "points") };
    let result = geometry_of(name, center, &raw, points);
    unsafe { write_boxed(result, out_geometry) }
}

fn drift_of(
    lkp: PoiskPosition,
    wind: PoiskReading,
    current: PoiskReading,
    elapsed_hours: f64,
) -> Result<PoiskDrift, FfiError> {
    let drift = estimate_drift(
        lkp.to_core()?,
        &wind.into(),
        &current.into(),
        Hours::new(elapsed_hours),
    )?;
    Ok(PoiskDrift {
        position: drift.drifted.into(),
        east_m: *drift.east,
        north_m: *drift.north,
        distance_m: *drift.distance(),
        set_deg: *drift.set(),
    })
}

fn geometry_of(
    name: Result<&str, Utf8Error>,
    center: PoiskPosition,
    raw: &PoiskSearchParams,
    points: Result<&[PoiskPosition], FfiError>,
) -> Result<PoiskGeometry, FfiError> {
    let name = name.map_err(|_| FfiError::invalid_parameter("method", "not valid UTF-8"))?;
    let points = points?
        .iter()
        .copied()
        .map(PoiskPosition::to_core)
        .collect::<Result<Vec<_>, _>>()?;
    let params = SearchParams {
        radius: raw.extent(raw.radius),
        legs: raw.legs,
        sectors: raw.sectors,
        orientation: Degrees::new(raw.orientation_deg),
        spacing: raw.extent(raw.spacing),
        tracks_per_side: raw.tracks_per_side,
        sweep_bearing: Degrees::new(raw.sweep_bearing_deg),
        points,
    };
    let geometry = generate_by_name(name, center.to_core()?, &params)?;
    Ok(PoiskGeometry {
        vertices: geometry.vertices().into_iter().map(Into::into).collect(),
        closed: geometry.is_closed(),
    })
}

/// Borrow the vertex array of a geometry. Parallel sweeps are returned as
/// consecutive start/end pairs, one pair per track.
///
/// Returns null (and a zero length) for a null handle. The array stays valid
/// until the handle is freed.
///
/// # Safety
/// - `geometry` must be null or a live handle from `poisk_search_geometry_new`.
/// - `out_len` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_search_geometry_vertices(
    geometry: *const PoiskGeometry,
    out_len: *mut usize,
) -> *const PoiskPosition {
    if out_len.is_null() {
        track_error(&FfiError::null_pointer("out_len"));
        return ptr::null();
    }
    match unsafe { geometry.as_ref() } {
        Some(g) => {
            unsafe { *out_len = g.vertices.len() };
            g.vertices.as_ptr()
        }
        None => {
            unsafe { *out_len = 0 };
            ptr::null()
        }
    }
}

/// Whether the vertex array forms a closed ring (first vertex repeated last).
///
/// # Safety
/// `geometry` must be null or a live handle from `poisk_search_geometry_new`.
#[no_mangle]
pub unsafe extern "C" fn poisk_search_geometry_is_closed(geometry: *const PoiskGeometry) -> bool {
    unsafe { geometry.as_ref() }.is_some_and(|g| g.closed)
}

/// Release a geometry handle. Null is a no-op.
///
/// # Safety
/// `geometry` must be null or a handle from `poisk_search_geometry_new` that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn poisk_search_geometry_free(geometry: *mut PoiskGeometry) {
    if geometry.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(geometry));
    }
}

/// Build a dense probability grid centred on `center`.
///
/// # Safety
/// `out_grid` must be non-null; on success the caller owns the handle and
/// MUST release it with `poisk_probability_grid_free`.
#[no_mangle]
pub unsafe extern "C" fn poisk_probability_grid_new(
    center: PoiskPosition,
    radius_m: f64,
    resolution_m: f64,
    out_grid: *mut *mut PoiskProbabilityGrid,
) -> PoiskErrorCode {
    if out_grid.is_null() {
        return track_error(&FfiError::null_pointer("out_grid"));
    }
    let result = center.to_core().and_then(|center| {
        let grid = ProbabilityGrid::generate(
            center,
            Meters::new(radius_m),
            Meters::new(resolution_m),
        )?;
        Ok(PoiskProbabilityGrid { grid })
    });
    unsafe { write_boxed(result, out_grid) }
}

/// Cells per axis, 0 for a null handle.
///
/// # Safety
/// `grid` must be null or a live handle from `poisk_probability_grid_new`.
#[no_mangle]
pub unsafe extern "C" fn poisk_probability_grid_size(grid: *const PoiskProbabilityGrid) -> usize {
    unsafe { grid.as_ref() }.map_or(0, |g| g.grid.size())
}

/// Borrow the `size * size` row-major values. Valid until the handle is freed.
///
/// # Safety
/// - `grid` must be null or a live handle from `poisk_probability_grid_new`.
/// - `out_len` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_probability_grid_values(
    grid: *const PoiskProbabilityGrid,
    out_len: *mut usize,
) -> *const f64 {
    if out_len.is_null() {
        track_error(&FfiError::null_pointer("out_len"));
        return ptr::null();
    }
    match unsafe { grid.as_ref() } {
        Some(g) => {
            let values = g.grid.values();
            unsafe { *out_len = values.len() };
            values.as_ptr()
        }
        None => {
            unsafe { *out_len = 0 };
            ptr::null()
        }
    }
}

/// Release a grid handle. Null is a no-op.
///
/// # Safety
/// `grid` must be null or a handle from `poisk_probability_grid_new` that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn poisk_probability_grid_free(grid: *mut PoiskProbabilityGrid) {
    if grid.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(grid));
    }
}

/// Sample `count` weighted points within `radius_m` of `center`.
///
/// With `use_seed == false` a fresh seed is drawn; read it back with
/// `poisk_sampled_field_seed` to replay the run.
///
/// # Safety
/// `out_field` must be non-null; on success the caller owns the handle and
/// MUST release it with `poisk_sampled_field_free`.
#[no_mangle]
pub unsafe extern "C" fn poisk_sampled_field_new(
    center: PoiskPosition,
    radius_m: f64,
    count: usize,
    use_seed: bool,
    seed: u64,
    out_field: *mut *mut PoiskSampledField,
) -> PoiskErrorCode {
    if out_field.is_null() {
        return track_error(&FfiError::null_pointer("out_field"));
    }
    let result = center.to_core().and_then(|center| {
        let field = SampledField::generate(
            center,
            Meters::new(radius_m),
            count,
            use_seed.then_some(seed),
        )?;
        Ok(PoiskSampledField {
            seed: field.seed(),
            points: field
                .points()
                .iter()
                .map(|p| PoiskWeightedPoint {
                    position: p.position.into(),
                    weight: *p.weight,
                })
                .collect(),
        })
    });
    unsafe { write_boxed(result, out_field) }
}

/// Seed that produced the field, 0 for a null handle.
///
/// # Safety
/// `field` must be null or a live handle from `poisk_sampled_field_new`.
#[no_mangle]
pub unsafe extern "C" fn poisk_sampled_field_seed(field: *const PoiskSampledField) -> u64 {
    unsafe { field.as_ref() }.map_or(0, |f| f.seed)
}

/// Borrow the sampled points. Valid until the handle is freed.
///
/// # Safety
/// - `field` must be null or a live handle from `poisk_sampled_field_new`.
/// - `out_len` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn poisk_sampled_field_points(
    field: *const PoiskSampledField,
    out_len: *mut usize,
) -> *const PoiskWeightedPoint {
    if out_len.is_null() {
        track_error(&FfiError::null_pointer("out_len"));
        return ptr::null();
    }
    match unsafe { field.as_ref() } {
        Some(f) => {
            unsafe { *out_len = f.points.len() };
            f.points.as_ptr()
        }
        None => {
            unsafe { *out_len = 0 };
            ptr::null()
        }
    }
}

/// Release a sampled field handle. Null is a no-op.
///
/// # Safety
/// `field` must be null or a handle from `poisk_sampled_field_new` that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn poisk_sampled_field_free(field: *mut PoiskSampledField) {
    if field.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(field));
    }
}
