pub mod gemini;

pub use gemini::{
    convert_body_parts_gemini, describe_image, generate_images, send_generate_request,
    send_predict_request,
};
