use byteorder::{ByteOrder, LittleEndian};
use nalgebra::Vector3;
use volren_lib::volumetric::parse::DAT_HEADER_LEN;

/// `.dat` header
/// little-endian, total length 6B
/// 1. resolution -- 3x 16bit ints (x,y,z)
/// 2. data -- x*y*z 16bit values, x growing fastest
pub fn generate_header(dims: Vector3<u16>) -> Vec<u8> {
    let mut vec = vec![0; DAT_HEADER_LEN];
    let slice = &mut vec[..];

    LittleEndian::write_u16(&mut slice[0..2], dims.x);
    LittleEndian::write_u16(&mut slice[2..4], dims.y);
    LittleEndian::write_u16(&mut slice[4..6], dims.z);

    vec
}
