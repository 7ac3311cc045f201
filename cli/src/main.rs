#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use model::{
    cluster_radius, ColorScale, Dashboard, Directive, Event, LayerKind, RentEstimate, RentQuery,
    INITIAL_ZOOM, MAP_CENTER,
};

#[derive(StructOpt)]
#[structopt(
    name = "dashboard",
    about = "Inspect the district dashboard without a browser"
)]
struct Args {
    /// Directory holding districts.geojson, transit_lines.geojson,
    /// transit_stops.geojson and rents.csv. Missing files just leave their
    /// layer empty.
    #[structopt(long, default_value = "data", parse(from_os_str))]
    data: PathBuf,
    /// Re-evaluate overlay visibility at this zoom level
    #[structopt(long)]
    zoom: Option<f64>,
    /// Show only the districts whose legend color matches this hex value
    #[structopt(long)]
    filter_color: Option<String>,
    /// Look up a district by postal code and highlight it
    #[structopt(long)]
    lookup: Option<String>,
    /// Average rents matching
    /// newlyConst,balcony,lift,garden,serviceCharge,livingSpace,noRooms,postalCode
    #[structopt(long)]
    estimate: Option<String>,
    /// Print the choropleth legend
    #[structopt(long)]
    legend: bool,
    /// Print the district amenity chart series
    #[structopt(long)]
    chart: bool,
    /// Restore all districts and hide the transit overlays
    #[structopt(long)]
    reset: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::from_args();

    info!("Loading from {}", args.data.display());
    let mut dashboard = Dashboard::load_from_dir(&args.data);
    println!(
        "Map opens at {} zoom {}",
        MAP_CENTER, INITIAL_ZOOM
    );
    for kind in [
        LayerKind::District,
        LayerKind::TransitLine,
        LayerKind::TransitStop,
    ] {
        let layer = dashboard.layer(kind);
        println!("  {}: {} shapes", layer.name, layer.len());
    }
    println!("  Rent listings: {}", dashboard.rents.len());

    if args.legend {
        println!("Legend ({} by park coverage):", dashboard.districts.name);
        for entry in dashboard.legend() {
            println!("  {}", entry);
        }
    }

    if args.chart {
        print_chart(&dashboard);
    }

    if let Some(zoom) = args.zoom {
        println!("At zoom {} (cluster radius {}px):", zoom, cluster_radius(zoom));
        apply(&mut dashboard, Event::ZoomChanged(zoom));
        for shape in &dashboard.stops.shapes {
            let name = shape
                .feature
                .attributes
                .text(model::attr::NAME)
                .unwrap_or("unnamed");
            let category = shape
                .feature
                .attributes
                .text(model::attr::STOP_TYPE)
                .unwrap_or("uncategorized");
            println!(
                "  {} ({}): {}",
                name,
                category,
                if shape.visible { "shown" } else { "hidden" }
            );
        }
    }

    if let Some(hex) = args.filter_color {
        let scale = match &dashboard.districts.shading {
            Some(shading) => shading.scale.clone(),
            None => ColorScale::park_coverage(),
        };
        let color = match scale.color_matching(&hex) {
            Some(color) => color,
            None => bail!("{} isn't one of the legend colors", hex),
        };
        println!("Filtering districts to {}:", color);
        apply(&mut dashboard, Event::LegendSwatchClicked(color));
    }

    if let Some(code) = args.lookup {
        println!("Looking up postal code {}:", code);
        apply(&mut dashboard, Event::PostalCodeSubmitted(code));
        match dashboard.highlighted() {
            Some((kind, id)) => {
                if let Some(shape) = dashboard.layer(kind).get(id) {
                    println!("  Highlighted {}:", id);
                    for (key, value) in shape.feature.attributes.iter() {
                        println!("    {} = {}", key, value);
                    }
                }
            }
            None => println!("  Nothing highlighted"),
        }
    }

    if let Some(raw) = args.estimate {
        let query = RentQuery::parse(&raw)?;
        for directive in dashboard.handle(Event::CalculatorSubmitted(query)) {
            if let Directive::CalculatorResult(estimate) = directive {
                match estimate {
                    RentEstimate::Average(rent) => {
                        println!("Average total rent: {:.2} EUR", rent);
                    }
                    RentEstimate::NoMatch => {
                        println!("No listing matches that combination exactly");
                    }
                }
            }
        }
    }

    if args.reset {
        println!("Resetting:");
        apply(&mut dashboard, Event::ResetRequested);
    }

    Ok(())
}

/// Feeds one event through and prints the resulting directives the way a
/// renderer would see them.
fn apply(dashboard: &mut Dashboard, event: Event) {
    for directive in dashboard.handle(event) {
        println!("  -> {}", describe(&directive));
    }
}

fn describe(directive: &Directive) -> String {
    match directive {
        Directive::Restyle { layer, id, style } => format!(
            "restyle {} {}: outline {} weight {}, fill {} opacity {}",
            layer, id, style.color, style.weight, style.fill_color, style.fill_opacity
        ),
        Directive::ShapeVisibility {
            layer,
            shown,
            hidden,
        } => format!(
            "{}: show {} shapes, hide {}",
            layer,
            shown.len(),
            hidden.len()
        ),
        Directive::LayerVisibility { layer, visible } => format!(
            "{} layer {}",
            layer,
            if *visible { "on" } else { "off" }
        ),
        Directive::SendToBack { layer } => format!("send {} to the back", layer),
        Directive::HighlightChanged { selected } => match selected {
            Some((layer, id)) => format!("highlight is now {} in {}", id, layer),
            None => "highlight cleared".to_string(),
        },
        Directive::ChartDataChanged(chart) => {
            format!("chart updated for {} districts", chart.labels.len())
        }
        Directive::CalculatorResult(_) => "calculator answered".to_string(),
    }
}

fn print_chart(dashboard: &Dashboard) {
    let chart = dashboard.district_chart();
    if chart.labels.is_empty() {
        println!("No districts loaded, nothing to chart");
        return;
    }
    println!("{} / {} per district:", chart.bars.name, chart.line.name);
    for (idx, label) in chart.labels.iter().enumerate() {
        println!(
            "  {}: {} / {}",
            label, chart.bars.values[idx], chart.line.values[idx]
        );
    }
}
