use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(100, 128), 50);
    assert_eq!(mul_div255_u16(200, 200), 157);
}

#[test]
fn div_alpha_inverts_premultiplication_for_opaque_and_clear() {
    assert_eq!(div_alpha_u8(0, 0), 0);
    assert_eq!(div_alpha_u8(77, 255), 77);
    assert_eq!(div_alpha_u8(50, 128), 100);
    assert_eq!(div_alpha_u8(200, 100), 255);
}
