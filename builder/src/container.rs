// Licensed under the Apache-2.0 license

use boot_image::{ImageType, HDR_LEN, SIG_ALIGN, SIG_LEN};

use crate::header::{align_up, build_binding, encode_header};
use crate::signer::{sign, ImageSigner, RawSignature};
use crate::{BootImageError, BootImageResult};

/// Offsets of a container, derived only from the payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    pub payload_off: u32,
    pub payload_len: u32,
    pub sig_off: u32,
    pub sig_len: u32,
}

impl ContainerLayout {
    pub fn for_payload(payload_len: usize) -> BootImageResult<Self> {
        let payload_off = HDR_LEN as u32;
        let too_large = || BootImageError::PayloadTooLarge(payload_len);
        let payload_len_u32 = u32::try_from(payload_len).map_err(|_| too_large())?;
        let payload_end = payload_off
            .checked_add(payload_len_u32)
            .ok_or_else(too_large)?;
        // align_up and the signature must not wrap either.
        payload_end
            .checked_add(SIG_ALIGN - 1 + SIG_LEN as u32)
            .ok_or_else(too_large)?;
        let sig_off = align_up(payload_end, SIG_ALIGN);
        if sig_off % SIG_ALIGN != 0 {
            return Err(BootImageError::MisalignedOffset {
                what: "signature offset",
                value: sig_off.into(),
                align: SIG_ALIGN,
            });
        }
        Ok(Self {
            payload_off,
            payload_len: payload_len_u32,
            sig_off,
            sig_len: SIG_LEN as u32,
        })
    }

    pub fn pad_len(&self) -> usize {
        (self.sig_off - (self.payload_off + self.payload_len)) as usize
    }

    pub fn total_len(&self) -> usize {
        self.sig_off as usize + self.sig_len as usize
    }
}

fn assemble(
    header: &[u8; HDR_LEN],
    layout: &ContainerLayout,
    payload: &[u8],
    sig: &RawSignature,
) -> Vec<u8> {
    let mut image = Vec::with_capacity(layout.total_len());
    image.extend_from_slice(header);
    image.extend_from_slice(payload);
    image.resize(image.len() + layout.pad_len(), 0);
    image.extend_from_slice(sig.as_bytes());
    debug_assert_eq!(image.len(), layout.total_len());
    image
}

fn header_for(
    img_type: ImageType,
    layout: &ContainerLayout,
    load_addr: u32,
    entry_addr: u32,
) -> [u8; HDR_LEN] {
    encode_header(
        img_type.into(),
        layout.payload_off,
        layout.payload_len,
        load_addr,
        entry_addr,
        layout.sig_off,
        layout.sig_len,
    )
}

/// Builds `header || payload || zero pad || r||s`, where the signature covers
/// the header binding followed by the payload.
pub fn build_container(
    img_type: ImageType,
    payload: &[u8],
    load_addr: u32,
    entry_addr: u32,
    signer: &dyn ImageSigner,
) -> BootImageResult<Vec<u8>> {
    let layout = ContainerLayout::for_payload(payload.len())?;
    let header = header_for(img_type, &layout, load_addr, entry_addr);

    let bind = build_binding(img_type.into(), layout.payload_len, load_addr, entry_addr);
    let mut message = Vec::with_capacity(bind.len() + payload.len());
    message.extend_from_slice(&bind);
    message.extend_from_slice(payload);
    let sig = sign(signer, &message)?;

    log::debug!(
        "{}: payload_off={} payload_len={} sig_off={} sig_len={} load=0x{:08x} entry=0x{:08x}",
        img_type.name(),
        layout.payload_off,
        layout.payload_len,
        layout.sig_off,
        layout.sig_len,
        load_addr,
        entry_addr
    );
    log::debug!("{}: signature {}", img_type.name(), hex::encode(sig.as_bytes()));

    Ok(assemble(&header, &layout, payload, &sig))
}

/// Same layout as [`build_container`], with the signature left as zeros. For
/// ROMs that do not check signatures yet.
pub fn build_unsigned_container(
    img_type: ImageType,
    payload: &[u8],
    load_addr: u32,
    entry_addr: u32,
) -> BootImageResult<Vec<u8>> {
    let layout = ContainerLayout::for_payload(payload.len())?;
    let header = header_for(img_type, &layout, load_addr, entry_addr);
    Ok(assemble(&header, &layout, payload, &RawSignature::zeroed()))
}
