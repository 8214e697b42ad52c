#![cfg(target_os = "windows")]

//! Minimal COM plumbing for the three interfaces the handshake touches.
//!
//! Only the vtable slots that are called carry a function type; the rest are
//! kept as opaque pointers so the layout matches the SDK headers.

use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;
use windows_sys::Win32::Media::Audio::WAVEFORMATEX;
use windows_sys::Win32::System::Com::CoTaskMemFree;
use windows_sys::core::{GUID, HRESULT};

pub const CLSID_MM_DEVICE_ENUMERATOR: GUID =
    GUID::from_u128(0xbcde0395_e52f_467c_8e3d_c4579291692e);
pub const IID_IMM_DEVICE_ENUMERATOR: GUID =
    GUID::from_u128(0xa95664d2_9614_4f35_a746_de8db63617e6);
pub const IID_IAUDIO_CLIENT3: GUID = GUID::from_u128(0x7ed4ee07_8e67_4cd4_8c1a_2b7a5987ad42);

type Slot = *const c_void;

#[repr(C)]
pub struct IUnknownVtbl {
    pub query_interface:
        unsafe extern "system" fn(*mut c_void, *const GUID, *mut *mut c_void) -> HRESULT,
    pub add_ref: unsafe extern "system" fn(*mut c_void) -> u32,
    pub release: unsafe extern "system" fn(*mut c_void) -> u32,
}

#[repr(C)]
pub struct IMMDeviceEnumeratorVtbl {
    pub base: IUnknownVtbl,
    pub enum_audio_endpoints: Slot,
    pub get_default_audio_endpoint:
        unsafe extern "system" fn(*mut c_void, i32, i32, *mut *mut c_void) -> HRESULT,
    pub get_device: Slot,
    pub register_endpoint_notification_callback: Slot,
    pub unregister_endpoint_notification_callback: Slot,
}

#[repr(C)]
pub struct IMMDeviceVtbl {
    pub base: IUnknownVtbl,
    pub activate: unsafe extern "system" fn(
        *mut c_void,
        *const GUID,
        u32,
        *const c_void,
        *mut *mut c_void,
    ) -> HRESULT,
    pub open_property_store: Slot,
    pub get_id: Slot,
    pub get_state: Slot,
}

#[repr(C)]
pub struct IAudioClient3Vtbl {
    pub base: IUnknownVtbl,
    // IAudioClient
    pub initialize: Slot,
    pub get_buffer_size: Slot,
    pub get_stream_latency: Slot,
    pub get_current_padding: Slot,
    pub is_format_supported: Slot,
    pub get_mix_format: unsafe extern "system" fn(*mut c_void, *mut *mut WAVEFORMATEX) -> HRESULT,
    pub get_device_period: Slot,
    pub start: unsafe extern "system" fn(*mut c_void) -> HRESULT,
    pub stop: Slot,
    pub reset: Slot,
    pub set_event_handle: Slot,
    pub get_service: Slot,
    // IAudioClient2
    pub is_offload_capable: Slot,
    pub set_client_properties: Slot,
    pub get_buffer_size_limits: Slot,
    // IAudioClient3
    pub get_shared_mode_engine_period: unsafe extern "system" fn(
        *mut c_void,
        *const WAVEFORMATEX,
        *mut u32,
        *mut u32,
        *mut u32,
        *mut u32,
    ) -> HRESULT,
    pub get_current_shared_mode_engine_period:
        unsafe extern "system" fn(*mut c_void, *mut *mut WAVEFORMATEX, *mut u32) -> HRESULT,
    pub initialize_shared_audio_stream: unsafe extern "system" fn(
        *mut c_void,
        u32,
        u32,
        *const WAVEFORMATEX,
        *const GUID,
    ) -> HRESULT,
}

/// Owned interface pointer; dropping it calls `IUnknown::Release` once.
pub struct ComPtr<V> {
    raw: NonNull<*const V>,
    _vtbl: PhantomData<V>,
}

impl<V> ComPtr<V> {
    /// Take ownership of one reference held by `raw`.
    ///
    /// # Safety
    /// `raw` must be null or an interface pointer whose vtable starts with `V`.
    pub unsafe fn from_raw(raw: *mut c_void) -> Option<Self> {
        NonNull::new(raw.cast::<*const V>()).map(|raw| Self {
            raw,
            _vtbl: PhantomData,
        })
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.raw.as_ptr().cast()
    }

    pub fn vtbl(&self) -> &V {
        unsafe { &**self.raw.as_ptr() }
    }
}

impl<V> Drop for ComPtr<V> {
    fn drop(&mut self) {
        let unknown = self.raw.as_ptr().cast::<*const IUnknownVtbl>();
        unsafe {
            ((**unknown).release)(self.as_raw());
        }
    }
}

/// A `WAVEFORMATEX` allocated by the audio service; freed with `CoTaskMemFree`.
pub struct TaskMemFormat {
    raw: NonNull<WAVEFORMATEX>,
}

impl TaskMemFormat {
    /// # Safety
    /// `raw` must be null or a format block allocated with `CoTaskMemAlloc`.
    pub unsafe fn from_raw(raw: *mut WAVEFORMATEX) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    pub fn as_ptr(&self) -> *const WAVEFORMATEX {
        self.raw.as_ptr()
    }

    pub fn header(&self) -> WAVEFORMATEX {
        unsafe { std::ptr::read_unaligned(self.raw.as_ptr()) }
    }
}

impl Drop for TaskMemFormat {
    fn drop(&mut self) {
        unsafe { CoTaskMemFree(self.raw.as_ptr().cast::<c_void>()) };
    }
}
