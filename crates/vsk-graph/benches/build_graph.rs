use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vsk_core::Volume;
use vsk_graph::{OrphanBranchPolicy, SkeletonGraphBuilder, UniformThickness};
use vsk_morph::Execution;

/// Axis-aligned lines every `pitch` voxels; crossings become 6-arm junctions.
fn synthetic_lattice(size: usize, pitch: usize) -> Volume<u8> {
    let mut vol = Volume::new_fill(size, size, size, 0u8).expect("valid volume");
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let on_axis = [x % pitch == 0, y % pitch == 0, z % pitch == 0];
                if on_axis.iter().filter(|&&b| b).count() >= 2 {
                    *vol.get_mut(x, y, z).expect("in bounds") = 1;
                }
            }
        }
    }
    vol
}

fn bench_build_graph(c: &mut Criterion) {
    let vol = synthetic_lattice(96, 12);
    let thickness = UniformThickness(1.0);

    let par = SkeletonGraphBuilder::default().orphan_branches(OrphanBranchPolicy::Drop);
    c.bench_function("vsk_build_graph_96_par", |b| {
        b.iter(|| {
            let g = par
                .build(black_box(&vol.as_view()), &thickness)
                .expect("lattice graph");
            black_box(g.num_edges());
        });
    });

    let seq = SkeletonGraphBuilder::default()
        .orphan_branches(OrphanBranchPolicy::Drop)
        .execution(Execution::Sequential);
    c.bench_function("vsk_build_graph_96_seq", |b| {
        b.iter(|| {
            let g = seq
                .build(black_box(&vol.as_view()), &thickness)
                .expect("lattice graph");
            black_box(g.num_edges());
        });
    });

    let regions = par.regions(&vol.as_view());
    c.bench_function("vsk_clip_boundary_96", |b| {
        b.iter(|| {
            let (clipped, ids) = vsk_graph::clip_boundary_with_ids(black_box(&regions.branches));
            black_box((clipped.num_labels(), ids.len()));
        });
    });
}

criterion_group!(benches, bench_build_graph);
criterion_main!(benches);
