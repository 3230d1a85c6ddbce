//! Validation tests: counting, degeneracy classification, bounding boxes,
//! and the read-only/idempotence guarantees.

use nalgebra::{Point3, Vector3};
use stlcodec::{Format, Mesh, Triangle, ValidationReport, decode, encode, validate};

fn proper() -> Triangle {
    Triangle::new(
        Vector3::new(0.0, 0.0, 1.0),
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ],
    )
}

#[test]
fn empty_mesh_report() {
    let report = validate(&Mesh::new());
    assert_eq!(
        report,
        ValidationReport {
            triangle_count: 0,
            degenerate_count: 0,
            bounding_box: None,
        }
    );
}

#[test]
fn counts_and_bounding_box() {
    let off_axis = Triangle::new(
        Vector3::new(1.0, 0.0, 0.0),
        [
            Point3::new(-1.0, -2.0, -3.0),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(-1.0, 0.0, 7.0),
        ],
    );
    let mesh = Mesh::from_triangles(vec![proper(), off_axis]);
    let report = validate(&mesh);

    assert_eq!(report.triangle_count, 2);
    assert_eq!(report.degenerate_count, 0);
    let aabb = report.bounding_box.unwrap();
    assert_eq!(aabb.mins, Point3::new(-1.0, -2.0, -3.0));
    assert_eq!(aabb.maxs, Point3::new(2.0, 4.0, 7.0));
}

#[test]
fn degenerate_facets_are_counted_not_rejected() {
    let point_like = Triangle::new(Vector3::zeros(), [Point3::new(1.0, 1.0, 1.0); 3]);
    let collinear = Triangle::new(
        Vector3::zeros(),
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ],
    );
    let mesh = Mesh::from_triangles(vec![proper(), point_like, collinear]);
    let report = validate(&mesh);

    assert_eq!(report.triangle_count, 3);
    assert_eq!(report.degenerate_count, 2);
    // Degenerate vertices still count toward the bounding box.
    assert_eq!(report.bounding_box.unwrap().maxs, Point3::new(2.0, 2.0, 2.0));
}

#[test]
fn decoded_degenerate_facet_reaches_the_report() {
    // A facet whose three vertices coincide decodes fine and shows up as
    // degenerate afterwards.
    let text = b"solid t
  facet normal 0 0 0
    outer loop
      vertex 3 3 3
      vertex 3 3 3
      vertex 3 3 3
    endloop
  endfacet
endsolid t
";
    let mesh = decode(text).unwrap();
    let report = validate(&mesh);
    assert_eq!(report.triangle_count, 1);
    assert_eq!(report.degenerate_count, 1);
    let aabb = report.bounding_box.unwrap();
    assert_eq!(aabb.mins, aabb.maxs);
}

#[test]
fn validate_is_idempotent_and_read_only() {
    let mesh = Mesh::from_triangles(vec![proper()]).with_name("keep");
    let before = mesh.clone();

    let first = validate(&mesh);
    let second = validate(&mesh);
    assert_eq!(first, second);
    assert_eq!(mesh, before, "validation must not mutate the mesh");
}

#[test]
fn equal_meshes_yield_equal_reports() {
    let mesh = Mesh::from_triangles(vec![proper()]);
    let trip = decode(&encode(&mesh, Format::Binary)).unwrap();
    assert_eq!(validate(&mesh), validate(&trip));
}

#[test]
fn validate_method_matches_free_function() {
    let mesh = Mesh::from_triangles(vec![proper()]);
    assert_eq!(mesh.validate(), validate(&mesh));
}

#[test]
fn report_bounding_box_matches_mesh() {
    let mesh = Mesh::from_triangles(vec![proper()]);
    assert_eq!(validate(&mesh).bounding_box, mesh.bounding_box());
}
