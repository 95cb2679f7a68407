//! Runtime-level behavior: validation, driver failures, defensive checks.

use std::sync::Arc;

use wavelink_core::{
    ChannelLayout, ContextConfig, MediaEncoding, ReceiverConfig, SampleFormat, SenderConfig,
};

use crate::driver::{EngineDriver, Handle};
use crate::error::{EngineError, Error};
use crate::runtime::Runtime;
use crate::tests::harness::{DummyDriver, init_tracing};

#[test]
fn invalid_sender_config_never_reaches_the_driver() {
    init_tracing();
    let driver = DummyDriver::new();
    let runtime = Runtime::new(driver.clone()).unwrap();
    let context = runtime.open_context(&ContextConfig::default()).unwrap();

    let bad_encoding = MediaEncoding::new(0, ChannelLayout::Stereo, SampleFormat::PcmFloat32);
    let config = SenderConfig {
        frame_encoding: bad_encoding,
        ..SenderConfig::builder(MediaEncoding::CD_STEREO).build().unwrap()
    };
    let err = context.open_sender(&config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(runtime.live_resources(), 1);
}

#[test]
fn open_on_closed_context_is_rejected_by_the_driver() {
    init_tracing();
    let driver = DummyDriver::new();
    let runtime = Runtime::new(driver.clone()).unwrap();
    let context = runtime.open_context(&ContextConfig::default()).unwrap();
    context.close().unwrap();

    let config = ReceiverConfig::builder(MediaEncoding::CD_STEREO).build().unwrap();
    let err = context.open_receiver(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::InvalidArgument { .. })
    ));
    assert_eq!(runtime.live_resources(), 0);
}

/// Driver that violates the contract by handing out the null handle.
struct NullHandleDriver;

impl EngineDriver for NullHandleDriver {
    fn open_context(&self, _config: &ContextConfig) -> Result<Handle, EngineError> {
        Ok(Handle::from_raw(0))
    }

    fn open_sender(
        &self,
        _context: Handle,
        _config: &SenderConfig,
    ) -> Result<Handle, EngineError> {
        Ok(Handle::from_raw(0))
    }

    fn open_receiver(
        &self,
        _context: Handle,
        _config: &ReceiverConfig,
    ) -> Result<Handle, EngineError> {
        Ok(Handle::from_raw(0))
    }

    fn destroy_context(&self, _handle: Handle) -> Result<(), EngineError> {
        Ok(())
    }

    fn destroy_sender(&self, _handle: Handle) -> Result<(), EngineError> {
        Ok(())
    }

    fn destroy_receiver(&self, _handle: Handle) -> Result<(), EngineError> {
        Ok(())
    }
}

#[test]
fn null_handle_from_driver_is_never_registered() {
    init_tracing();
    let runtime = Runtime::new(Arc::new(NullHandleDriver)).unwrap();

    let err = runtime.open_context(&ContextConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::InvalidArgument { .. })
    ));
    assert_eq!(runtime.live_resources(), 0);
}

#[test]
fn proxy_debug_output_names_the_handle() {
    init_tracing();
    let driver = DummyDriver::new();
    let runtime = Runtime::new(driver.clone()).unwrap();

    let context = runtime.open_context(&ContextConfig::default()).unwrap();
    let sender = context
        .open_sender(&SenderConfig::builder(MediaEncoding::CD_STEREO).build().unwrap())
        .unwrap();
    let receiver = context
        .open_receiver(&ReceiverConfig::builder(MediaEncoding::CD_STEREO).build().unwrap())
        .unwrap();

    assert_eq!(
        format!("{context:?}"),
        format!("Context {{ handle: {:?} }}", context.handle())
    );
    assert_eq!(
        format!("{sender:?}"),
        format!("Sender {{ handle: {:?} }}", sender.handle())
    );
    assert_eq!(
        format!("{receiver:?}"),
        format!("Receiver {{ handle: {:?} }}", receiver.handle())
    );
}

#[test]
fn live_resources_tracks_opens_and_closes() {
    init_tracing();
    let driver = DummyDriver::new();
    let runtime = Runtime::new(driver.clone()).unwrap();

    let context = runtime.open_context(&ContextConfig::default()).unwrap();
    let sender = context
        .open_sender(&SenderConfig::builder(MediaEncoding::CD_STEREO).build().unwrap())
        .unwrap();
    let receiver = context
        .open_receiver(&ReceiverConfig::builder(MediaEncoding::CD_STEREO).build().unwrap())
        .unwrap();
    assert_eq!(runtime.live_resources(), 3);

    receiver.close().unwrap();
    assert_eq!(runtime.live_resources(), 2);
    sender.close().unwrap();
    context.close().unwrap();
    assert_eq!(runtime.live_resources(), 0);
    assert_eq!(driver.total_destroyed(), 3);
}
