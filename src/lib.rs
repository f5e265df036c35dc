//! # Community Complaint Core
//!
//! Local record store and query engine for a community-issue reporting app.
//! Complaints are kept in memory and mirrored to a single slot of an LMDB
//! environment on the device. The library is loaded by the app shell
//! (Capacitor, Flutter or any C-ABI host) and driven through the functions
//! below, which exchange JSON text.
//!
//! ## Features
//!
//! - **Seeded on first start**: three example complaints are written when no
//!   persisted list exists
//! - **Whole-list persistence**: every submission or status change rewrites
//!   the stored list in one LMDB transaction
//! - **Search and category filter**: case-insensitive search over description,
//!   location and category
//! - **Status workflow**: `Pending`, `In Progress`, `Resolved`, settable in any
//!   order by an administrator
//!
//! ## Quick Start
//!
//! ```no_run
//! use community_complaint_core::complaint_model::ComplaintForm;
//! use community_complaint_core::complaint_query::filter_complaints;
//! use community_complaint_core::complaint_store::ComplaintStore;
//! use community_complaint_core::store_config::StoreConfig;
//!
//! let mut store = ComplaintStore::open(StoreConfig::new("my_app"))?;
//!
//! store.submit(ComplaintForm {
//!     name: "A".into(),
//!     email: "a@x.com".into(),
//!     category: "Other".into(),
//!     description: "Broken bench".into(),
//!     location: "Riverside".into(),
//!     photo: None,
//! })?;
//!
//! let benches = filter_complaints(store.complaints()?, "bench", "all");
//! assert_eq!(benches.len(), 1);
//! # Ok::<(), community_complaint_core::store_error::StoreError>(())
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_store`] - Open the store and load (or seed) the complaint list
//! - [`load_complaints`] - Current complaint list
//! - [`persist_complaints`] - Replace and persist the whole list
//! - [`submit_complaint`] - Append a new complaint from form JSON
//! - [`filter_complaints`] - Search and category filter
//! - [`change_status`] - Set one complaint's status
//! - [`get_complaint_by_id`] - Single complaint lookup
//! - [`list_categories`] - Category names for the form
//! - [`check_admin_credentials`] - Placeholder admin check
//! - [`close_store`] - Explicit environment release
//! - [`free_store`] - Close the store and free its handle
//! - [`free_response`] - Release a string returned by this library
//!
//! Text results are JSON-encoded [`AppResponse`](app_response::AppResponse)
//! envelopes such as `{"Ok":"[...]"}` or `{"ValidationError":"..."}`.

pub mod admin_auth;
pub mod app_response;
pub mod complaint_model;
pub mod complaint_query;
pub mod complaint_store;
pub mod complaint_submit;
pub mod store_config;
pub mod store_error;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

use crate::app_response::AppResponse;
use crate::complaint_model::{Complaint, ComplaintForm, ComplaintStatus, CATEGORIES};
use crate::complaint_store::ComplaintStore;
use crate::store_config::StoreConfig;
use crate::store_error::StoreError;

/// Opens the complaint store named `name` and loads its complaint list.
///
/// The environment lives in the directory `<name>.lmdb`, created if missing.
/// On first start the seed complaints are written.
///
/// # Parameters
///
/// * `name` - A null-terminated C string containing the store's base path
///
/// # Returns
///
/// A pointer to the [`ComplaintStore`], or null on failure. The pointer stays
/// owned by the caller until passed to [`free_store`].
///
/// # Safety
///
/// `name` must be null or point to a null-terminated string.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, free_store};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// if !store.is_null() {
///     // Store opened, seeded on first start
///     free_store(store);
/// }
/// ```
///
/// # Errors
///
/// Returns null if:
/// - `name` is null or not valid UTF-8
/// - The environment cannot be created or read
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut ComplaintStore {
    if name.is_null() {
        warn!("Null name pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    let config = StoreConfig::new(name_str);
    info!("Opening complaint store at: {}", config.env_dir().display());

    match ComplaintStore::open(config) {
        Ok(store) => {
            info!("✅ Complaint store ready");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("❌ Failed to open complaint store: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Returns the current complaint list.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
///
/// # Returns
///
/// An `Ok` envelope carrying the JSON array of complaints in insertion order,
/// or `BadRequest` for a null or closed store. Free the result with
/// [`free_response`].
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, free_response, load_complaints};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let all = load_complaints(store);
/// free_response(all);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_complaints(store: *mut ComplaintStore) -> *const c_char {
    let store = match store_ref(store, "load_complaints") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.complaints() {
        Ok(complaints) => response_to_c_string(&AppResponse::json(complaints)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Replaces the whole complaint list and persists it.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `json_ptr` - Null-terminated JSON array of complaints
///
/// # Returns
///
/// `Ok` with a count message on success. `SerializationError` for JSON that is
/// not a complaint list (including unknown status text), `ValidationError`
/// when an id appears twice, `BadRequest` for null pointers or a closed store.
///
/// # Safety
///
/// Both pointers must be null or valid for their types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, persist_complaints};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let empty = CString::new("[]").unwrap();
/// let result = persist_complaints(store, empty.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn persist_complaints(store: *mut ComplaintStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_mut(store, "persist_complaints") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let complaints: Vec<Complaint> = match serde_json::from_str(&json_str) {
        Ok(c) => c,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid complaint list: {e}"));
            return response_to_c_string(&error);
        }
    };

    let count = complaints.len();
    match store.persist(complaints) {
        Ok(()) => response_to_c_string(&AppResponse::success(format!("Persisted {count} complaints"))),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Submits a complaint from form JSON and returns the stored record.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `json_ptr` - Null-terminated form JSON
///
/// # Returns
///
/// `Ok` carrying the new complaint's JSON. Empty required fields are rejected
/// with a `ValidationError` naming them, standing in for the form's required
/// controls.
///
/// # Safety
///
/// Both pointers must be null or valid for their types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, submit_complaint};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let form = CString::new(r#"{"name":"A","email":"a@x.com","category":"Other","description":"d","location":"l"}"#).unwrap();
/// let result = submit_complaint(store, form.as_ptr());
/// ```
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "Jane Smith",
///   "email": "jane@example.com",
///   "category": "Sanitation",
///   "description": "Garbage bins overflowed in the park",
///   "location": "Central Park",
///   "photo": "data:image/png;base64,..."
/// }
/// ```
///
/// `photo` is optional and stored verbatim.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn submit_complaint(store: *mut ComplaintStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_mut(store, "submit_complaint") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let form: ComplaintForm = match serde_json::from_str(&json_str) {
        Ok(f) => f,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    let missing = form.missing_fields();
    if !missing.is_empty() {
        let error = AppResponse::ValidationError(format!("Missing required fields: {}", missing.join(", ")));
        return response_to_c_string(&error);
    }

    match store.submit(form) {
        Ok(complaint) => response_to_c_string(&AppResponse::json(&complaint)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Filters the current list by search term and category.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `search_term` - Case-insensitive text matched against description,
///   location and category; null is treated as empty
/// * `category` - Exact category name or `"all"`; null is treated as `"all"`
///
/// # Returns
///
/// `Ok` carrying the matching complaints as a JSON array, in list order.
///
/// # Safety
///
/// All pointers must be null or valid for their types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, filter_complaints};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let search = CString::new("park").unwrap();
/// let category = CString::new("all").unwrap();
/// let result = filter_complaints(store, search.as_ptr(), category.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn filter_complaints(
    store: *mut ComplaintStore,
    search_term: *const c_char,
    category: *const c_char,
) -> *const c_char {
    let store = match store_ref(store, "filter_complaints") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let search = match optional_c_string(search_term, "search term") {
        Ok(s) => s.unwrap_or_default(),
        Err(err) => return err,
    };
    let category = match optional_c_string(category, "category") {
        Ok(c) => c.unwrap_or_else(|| complaint_model::ALL_CATEGORIES.to_string()),
        Err(err) => return err,
    };

    match store.complaints() {
        Ok(complaints) => {
            let filtered = complaint_query::filter_complaints(complaints, &search, &category);
            response_to_c_string(&AppResponse::json(&filtered))
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Sets the status of one complaint and returns the updated list.
///
/// An unknown id leaves the list unchanged and still succeeds. This function
/// performs no authorization; the shell gates it behind its admin session.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `id` - Complaint id
/// * `status` - `"Pending"`, `"In Progress"` or `"Resolved"`
///
/// # Returns
///
/// `Ok` carrying the full complaint list as JSON, or `ValidationError` for any
/// other status text.
///
/// # Safety
///
/// All pointers must be null or valid for their types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{change_status, create_store};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let id = CString::new("2").unwrap();
/// let status = CString::new("Resolved").unwrap();
/// let result = change_status(store, id.as_ptr(), status.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn change_status(
    store: *mut ComplaintStore,
    id: *const c_char,
    status: *const c_char,
) -> *const c_char {
    let store = match store_mut(store, "change_status") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    let status_str = match c_ptr_to_string(status, "status") {
        Ok(status) => status,
        Err(err) => return err,
    };

    let status: ComplaintStatus = match status_str.parse() {
        Ok(s) => s,
        Err(e) => return response_to_c_string(&AppResponse::from(e)),
    };

    let result = store
        .change_status(&id_str, status)
        .and_then(|_| store.complaints().map(|complaints| AppResponse::json(complaints)));

    match result {
        Ok(response) => response_to_c_string(&response),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Retrieves a single complaint by id.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `id` - Complaint id
///
/// # Returns
///
/// `Ok` carrying the complaint's JSON, or `NotFound` when no complaint has
/// that id.
///
/// # Safety
///
/// Both pointers must be null or valid for their types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, get_complaint_by_id};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let id = CString::new("3").unwrap();
/// let result = get_complaint_by_id(store, id.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_complaint_by_id(store: *mut ComplaintStore, id: *const c_char) -> *const c_char {
    let store = match store_ref(store, "get_complaint_by_id") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    match store.find_by_id(&id_str) {
        Ok(Some(complaint)) => response_to_c_string(&AppResponse::json(complaint)),
        Ok(None) => {
            let error = AppResponse::NotFound(format!("No complaint found with id: {id_str}"));
            response_to_c_string(&error)
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Returns the category names offered by the submission form as a JSON array.
///
/// # Examples
///
/// ```no_run
/// use community_complaint_core::{free_response, list_categories};
///
/// let categories = list_categories();
/// free_response(categories);
/// ```
#[no_mangle]
pub extern "C" fn list_categories() -> *const c_char {
    response_to_c_string(&AppResponse::json(&CATEGORIES))
}

/// Placeholder admin check. **Not a security boundary**; see
/// [`admin_auth`].
///
/// # Parameters
///
/// * `username` - Null-terminated user name
/// * `password` - Null-terminated password
///
/// # Returns
///
/// `true` only for the fixed placeholder pair. `false` for null or non-UTF-8
/// input.
///
/// # Safety
///
/// Both pointers must be null or point to null-terminated strings.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::check_admin_credentials;
///
/// let user = CString::new("admin").unwrap();
/// let pass = CString::new("password").unwrap();
/// assert!(check_admin_credentials(user.as_ptr(), pass.as_ptr()));
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn check_admin_credentials(username: *const c_char, password: *const c_char) -> bool {
    if username.is_null() || password.is_null() {
        warn!("Null pointer passed to check_admin_credentials");
        return false;
    }

    let username = unsafe { CStr::from_ptr(username) }.to_str();
    let password = unsafe { CStr::from_ptr(password) }.to_str();

    match (username, password) {
        (Ok(u), Ok(p)) => admin_auth::check_admin_credentials(u, p),
        _ => false,
    }
}

/// Flushes and closes the store environment without freeing the handle.
///
/// Later calls through the handle report `BadRequest`. Useful before an app
/// hot restart reopens the same store; release the handle afterwards with
/// [`free_store`].
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
///
/// # Returns
///
/// `Ok` on success; closing twice is harmless.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{close_store, create_store};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
///
/// // Before hot restart
/// let result = close_store(store);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(store: *mut ComplaintStore) -> *const c_char {
    let store = match store_mut(store, "close_store") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.close() {
        Ok(_) => response_to_c_string(&AppResponse::success("Complaint store closed successfully")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Closes the store if still open and frees the handle. Null is ignored.
///
/// # Safety
///
/// `store` must be null or a pointer from [`create_store`] not yet freed.
/// The pointer is dangling afterwards.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use community_complaint_core::{create_store, free_store};
///
/// let name = CString::new("complaints").unwrap();
/// let store = create_store(name.as_ptr());
/// free_store(store);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_store(store: *mut ComplaintStore) {
    if store.is_null() {
        return;
    }

    let mut store = unsafe { Box::from_raw(store) };
    if let Err(e) = store.close() {
        warn!("Error closing complaint store before free: {e}");
    }
}

/// Releases a string previously returned by this library. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a string returned by this library, freed only once.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}
/// Serializes `response` to JSON and hands ownership of the text to the caller.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust `String`.
///
/// On failure the `Err` carries a ready-to-return `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn optional_c_string(ptr: *const c_char, field_name: &str) -> Result<Option<String>, *const c_char> {
    if ptr.is_null() {
        return Ok(None);
    }
    c_ptr_to_string(ptr, field_name).map(Some)
}

/// Read access to a live store; a null or closed store yields `BadRequest`.
fn store_ref<'a>(store: *mut ComplaintStore, caller: &str) -> Result<&'a ComplaintStore, *const c_char> {
    match unsafe { store.as_ref() } {
        Some(s) if s.is_closed() => {
            let error = AppResponse::from(StoreError::Closed);
            Err(response_to_c_string(&error))
        }
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null store pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn store_mut<'a>(store: *mut ComplaintStore, caller: &str) -> Result<&'a mut ComplaintStore, *const c_char> {
    match unsafe { store.as_mut() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null store pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}
