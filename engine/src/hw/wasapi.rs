#![cfg(target_os = "windows")]

pub mod com;
pub mod mmcss;

use self::com::{
    CLSID_MM_DEVICE_ENUMERATOR, ComPtr, IAudioClient3Vtbl, IID_IAUDIO_CLIENT3,
    IID_IMM_DEVICE_ENUMERATOR, IMMDeviceEnumeratorVtbl, IMMDeviceVtbl, TaskMemFormat,
};
use crate::hw::client::ClientHandle;
use crate::hw::traits::{
    AudioSubsystem, DataFlow, EnginePeriod, MixFormat, Role, SharedStreamRequest,
};
use std::ffi::c_void;
use std::ptr;
use windows_sys::Win32::Media::Audio::{
    WAVEFORMATEX, eCapture, eCommunications, eConsole, eMultimedia, eRender,
};
use windows_sys::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx, CoUninitialize,
};

pub use self::mmcss::{Mmcss, MmcssTask};

/// The stream produced by [`crate::start`].
pub type WasapiClient = ClientHandle<Wasapi, Mmcss>;

const E_POINTER: i32 = 0x8000_4003_u32 as i32;

pub struct DeviceEnumerator(ComPtr<IMMDeviceEnumeratorVtbl>);
pub struct Endpoint(ComPtr<IMMDeviceVtbl>);
pub struct AudioClient3(ComPtr<IAudioClient3Vtbl>);
pub struct WaveFormat(TaskMemFormat);

/// Windows Audio Session API, bound to `IAudioClient3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wasapi;

fn check(hr: i32) -> Result<(), i32> {
    if hr < 0 { Err(hr) } else { Ok(()) }
}

fn data_flow(flow: DataFlow) -> i32 {
    match flow {
        DataFlow::Render => eRender,
        DataFlow::Capture => eCapture,
    }
}

fn role(role: Role) -> i32 {
    match role {
        Role::Console => eConsole,
        Role::Multimedia => eMultimedia,
        Role::Communications => eCommunications,
    }
}

impl AudioSubsystem for Wasapi {
    type Enumerator = DeviceEnumerator;
    type Device = Endpoint;
    type Client = AudioClient3;
    type Format = WaveFormat;

    fn initialize_environment(&self) -> Result<(), i32> {
        // S_FALSE (already initialized on this thread) still needs a matching uninit.
        check(unsafe { CoInitializeEx(ptr::null(), COINIT_APARTMENTTHREADED as u32) })
    }

    fn uninitialize_environment(&self) {
        unsafe { CoUninitialize() };
    }

    fn device_enumerator(&self) -> Result<DeviceEnumerator, i32> {
        let mut raw: *mut c_void = ptr::null_mut();
        check(unsafe {
            CoCreateInstance(
                &CLSID_MM_DEVICE_ENUMERATOR,
                ptr::null_mut(),
                CLSCTX_ALL,
                &IID_IMM_DEVICE_ENUMERATOR,
                &mut raw,
            )
        })?;
        unsafe { ComPtr::from_raw(raw) }
            .map(DeviceEnumerator)
            .ok_or(E_POINTER)
    }

    fn default_endpoint(
        &self,
        enumerator: &DeviceEnumerator,
        flow: DataFlow,
        device_role: Role,
    ) -> Result<Endpoint, i32> {
        let this = &enumerator.0;
        let mut raw: *mut c_void = ptr::null_mut();
        check(unsafe {
            (this.vtbl().get_default_audio_endpoint)(
                this.as_raw(),
                data_flow(flow),
                role(device_role),
                &mut raw,
            )
        })?;
        unsafe { ComPtr::from_raw(raw) }.map(Endpoint).ok_or(E_POINTER)
    }

    fn activate_client(&self, device: &Endpoint) -> Result<AudioClient3, i32> {
        let this = &device.0;
        let mut raw: *mut c_void = ptr::null_mut();
        // E_NOINTERFACE here means the endpoint has no IAudioClient3.
        check(unsafe {
            (this.vtbl().activate)(
                this.as_raw(),
                &IID_IAUDIO_CLIENT3,
                CLSCTX_ALL,
                ptr::null(),
                &mut raw,
            )
        })?;
        unsafe { ComPtr::from_raw(raw) }
            .map(AudioClient3)
            .ok_or(E_POINTER)
    }

    fn mix_format(&self, client: &AudioClient3) -> Result<WaveFormat, i32> {
        let this = &client.0;
        let mut raw: *mut WAVEFORMATEX = ptr::null_mut();
        check(unsafe { (this.vtbl().get_mix_format)(this.as_raw(), &mut raw) })?;
        unsafe { TaskMemFormat::from_raw(raw) }
            .map(WaveFormat)
            .ok_or(E_POINTER)
    }

    fn describe_format(&self, format: &WaveFormat) -> MixFormat {
        let header = format.0.header();
        MixFormat {
            sample_rate: header.nSamplesPerSec,
            bits_per_sample: header.wBitsPerSample,
            channels: header.nChannels,
        }
    }

    fn engine_period(
        &self,
        client: &AudioClient3,
        format: &WaveFormat,
    ) -> Result<EnginePeriod, i32> {
        let this = &client.0;
        let mut period = EnginePeriod {
            default_frames: 0,
            fundamental_frames: 0,
            min_frames: 0,
            max_frames: 0,
        };
        check(unsafe {
            (this.vtbl().get_shared_mode_engine_period)(
                this.as_raw(),
                format.0.as_ptr(),
                &mut period.default_frames,
                &mut period.fundamental_frames,
                &mut period.min_frames,
                &mut period.max_frames,
            )
        })?;
        Ok(period)
    }

    fn current_engine_period(&self, client: &AudioClient3) -> Result<u32, i32> {
        let this = &client.0;
        let mut raw: *mut WAVEFORMATEX = ptr::null_mut();
        let mut frames = 0u32;
        check(unsafe {
            (this.vtbl().get_current_shared_mode_engine_period)(
                this.as_raw(),
                &mut raw,
                &mut frames,
            )
        })?;
        // The engine hands out its current format as well; only the period is reported.
        drop(unsafe { TaskMemFormat::from_raw(raw) });
        Ok(frames)
    }

    fn initialize_shared_stream(
        &self,
        client: &AudioClient3,
        request: SharedStreamRequest,
        format: &WaveFormat,
    ) -> Result<(), i32> {
        let this = &client.0;
        check(unsafe {
            (this.vtbl().initialize_shared_audio_stream)(
                this.as_raw(),
                request.flags.0,
                request.period_frames,
                format.0.as_ptr(),
                ptr::null(),
            )
        })
    }

    fn start_stream(&self, client: &AudioClient3) -> Result<(), i32> {
        let this = &client.0;
        check(unsafe { (this.vtbl().start)(this.as_raw()) })
    }
}
