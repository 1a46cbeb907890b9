/// Supplemental packages appended after every discovered source
///
/// The image build installs these ahead of component requirements, so a
/// component declaration of the same name wins only if it was discovered.
/// Order matters: entries are injected in this order.
pub const SUPPLEMENTAL: &[&str] = &[
    "torch==2.6.0",
    "torchvision",
    "torchaudio",
    "xformers==0.0.29.post3",
    "opencv-python==4.8.0.76",
    "opencv-contrib-python==4.8.0.76",
    "sageattention==1.0.6",
    "bizyengine==1.2.4",
];

/// Packages installed separately by the image build
///
/// Written as full specifiers; only the names take part in exclusion.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "insightface==0.7.3",
    "dlib==19.24.2",
    "fairscale==0.4.13",
];

/// Packages supplied by the Python runtime itself
///
/// Never emitted, whatever the sources declare.
pub const RUNTIME_PROVIDED: &[&str] = &["pip"];

#[cfg(test)]
mod tests;
