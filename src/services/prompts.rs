//! Hand-authored generation prompts, one per style and photo kind.

use crate::models::DesignType;

/// Style-specific design vocabulary shared by facade and interior prompts.
struct StyleBrief {
    headline: &'static str,
    features: &'static [&'static str],
    palette: &'static str,
    summary: &'static str,
}

fn facade_brief(design_type: DesignType) -> StyleBrief {
    match design_type {
        DesignType::ModernPremium => StyleBrief {
            headline: "a modern premium facade",
            features: &[
                "Sleek contemporary lines finished in premium materials",
                "Professional daylight lighting",
                "Modern glass and brushed steel elements",
                "Clean geometric patterns with subtle premium texturing",
            ],
            palette: "whites, cool grays and black accents",
            summary: "contemporary, upscale, professional commercial facade",
        },
        DesignType::TrustHeritage => StyleBrief {
            headline: "a trust & heritage facade",
            features: &[
                "Classic traditional architecture elements",
                "Warm evening lighting with golden tones",
                "Brick and stone textures",
                "Heritage-inspired columns or arches with traditional ornament",
            ],
            palette: "browns, creams and warm whites",
            summary: "classic, trustworthy, established heritage commercial facade",
        },
        DesignType::EcoSmart => StyleBrief {
            headline: "an eco-smart facade",
            features: &[
                "Sustainable green building elements",
                "Natural daylight on eco-friendly materials",
                "Living walls or planted green accents",
                "Integrated solar panels or other sustainable technology",
            ],
            palette: "greens, earth tones and natural whites",
            summary: "sustainable, modern, eco-conscious commercial facade",
        },
        DesignType::Festive => StyleBrief {
            headline: "a festive facade",
            features: &[
                "Vibrant festive decorative elements",
                "Warm night lighting with colorful accents",
                "Traditional Indian festive decorations such as diyas and torans",
                "Bright, welcoming atmosphere with festive light strings",
            ],
            palette: "vibrant colors, golds and bright whites",
            summary: "celebratory, vibrant, traditional Indian festive commercial facade",
        },
    }
}

fn interior_brief(design_type: DesignType) -> StyleBrief {
    match design_type {
        DesignType::ModernPremium => StyleBrief {
            headline: "a modern premium retail interior",
            features: &[
                "Minimal display shelving with premium finishes",
                "Even, bright LED lighting",
                "Polished concrete or stone flooring",
                "Uncluttered, well-organized product presentation",
            ],
            palette: "whites, grays and black accents",
            summary: "contemporary, upscale showroom interior",
        },
        DesignType::TrustHeritage => StyleBrief {
            headline: "a trust & heritage retail interior",
            features: &[
                "Wooden counters and traditional display cabinets",
                "Warm ambient lighting with golden tones",
                "Exposed brick or stone wall textures",
                "Orderly, well-established shop layout",
            ],
            palette: "browns, creams and warm whites",
            summary: "classic, trustworthy family-business interior",
        },
        DesignType::EcoSmart => StyleBrief {
            headline: "an eco-smart retail interior",
            features: &[
                "Indoor plants and natural material fixtures",
                "Daylight-friendly layout with energy-efficient lighting",
                "Recycled or bamboo shelving",
                "Open, airy circulation space",
            ],
            palette: "greens, earth tones and natural whites",
            summary: "sustainable, eco-conscious shop interior",
        },
        DesignType::Festive => StyleBrief {
            headline: "a festive retail interior",
            features: &[
                "Festive garlands, rangoli motifs and decorative lamps",
                "Warm lighting with colorful accent lights",
                "Celebratory product displays",
                "Bright, welcoming customer area",
            ],
            palette: "vibrant colors, golds and bright whites",
            summary: "celebratory, vibrant Indian festive shop interior",
        },
    }
}

fn render(subject: &str, brief: &StyleBrief, brand: &str, extra: Option<String>) -> String {
    let mut prompt = format!(
        "Transform this {} with {} while preserving the {} logo exactly as it appears.\n\
         Design features:\n",
        subject, brief.headline, brand
    );
    for feature in brief.features {
        prompt.push_str("- ");
        prompt.push_str(feature);
        prompt.push('\n');
    }
    prompt.push_str(&format!("- Color palette: {}\n", brief.palette));
    prompt.push_str(&format!("- Keep {} branding prominent\n", brand));
    prompt.push_str("- The logo must remain visible, unaltered and undistorted\n");
    if let Some(extra) = extra {
        prompt.push_str(&extra);
        prompt.push('\n');
    }
    prompt.push_str(&format!("Style: {}", brief.summary));
    prompt
}

/// Prompt for a storefront photo.
pub fn facade_prompt(design_type: DesignType, brand: &str) -> String {
    render("shopfront", &facade_brief(design_type), brand, None)
}

/// Prompt for an interior photo, tied to the style of the chosen storefront.
pub fn interior_prompt(
    design_type: DesignType,
    storefront_style: DesignType,
    brand: &str,
) -> String {
    let extra = format!(
        "- Stay visually consistent with the shop's {} storefront design",
        storefront_style.label()
    );
    render(
        "shop interior",
        &interior_brief(design_type),
        brand,
        Some(extra),
    )
}
