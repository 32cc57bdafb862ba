use super::*;

#[test]
fn format_follows_extension() {
    assert_eq!(
        VideoFormat::from_path(Path::new("out/anim.webm")),
        VideoFormat::WebmVp9
    );
    assert_eq!(
        VideoFormat::from_path(Path::new("out/anim.WEBM")),
        VideoFormat::WebmVp9
    );
    assert_eq!(
        VideoFormat::from_path(Path::new("out/anim.mp4")),
        VideoFormat::Mp4H264
    );
    assert_eq!(
        VideoFormat::from_path(Path::new("anim")),
        VideoFormat::Mp4H264
    );
}

#[test]
fn flatten_alpha_0_returns_bg() {
    let src = vec![200u8, 100, 50, 0];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_half_alpha_over_black() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn begin_rejects_odd_dimensions() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/odd.mp4"));
    let err = sink
        .begin(SinkConfig {
            width: 11,
            height: 10,
            fps: 30,
        })
        .unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)));
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/never.mp4"));
    assert!(
        sink.push_frame(0, &FrameRGBA::filled(2, 2, [0, 0, 0, 255]))
            .is_err()
    );
    assert!(sink.end().is_err());
}
