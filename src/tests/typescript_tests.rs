use super::*;
use crate::extractors::base::AccessModifier;

#[test]
fn test_exported_interface_with_field() {
    let result = parse_typescript("export interface User { id: number; }");

    assert_eq!(result.symbols.len(), 1);
    let user = &result.symbols[0];
    assert_eq!(user.name, "User");
    assert_eq!(user.kind, SymbolKind::Interface);
    assert!(user.exported);

    let id = child(user, "id");
    assert_eq!(id.kind, SymbolKind::Field);
    assert_eq!(id.receiver, "User");
}

#[test]
fn test_decorator_before_export() {
    let result = parse_typescript("@Injectable() export class Foo {}");

    let foo = symbol(&result, "Foo");
    assert_eq!(foo.kind, SymbolKind::Class);
    assert!(foo.exported);
    assert_eq!(foo.meta().decorators, vec!["Injectable".to_string()]);
}

#[test]
fn test_decorator_identifier_arguments() {
    let code = r#"
@Component({ selector: "app-root", providers: [UserService, Logger], standalone: true })
export class AppComponent {
    @Input() title: string;
}
"#;
    let result = parse_typescript(code);
    let app = symbol(&result, "AppComponent");

    let meta = app.meta();
    assert_eq!(meta.decorators, vec!["Component".to_string()]);
    assert_eq!(
        meta.decorator_args.get("Component"),
        Some(&vec!["UserService".to_string(), "Logger".to_string()]),
        "literals are ignored, identifiers inside containers are kept"
    );
    assert_eq!(child(app, "title").meta().decorators, vec!["Input".to_string()]);
}

#[test]
fn test_class_members_and_heritage() {
    let code = r#"
export class UserService extends BaseService implements Disposable {
    private cache: Map<string, User> = new Map();
    static instances = 0;

    constructor(private readonly repo: UserRepository, public name: string) {
        super();
    }

    async load(id: string): Promise<User> {
        return this.repo.find(id);
    }

    private reset(): void {}

    handle = (event: Event) => this.load(event.id);
}
"#;
    let result = parse_typescript(code);
    let service = symbol(&result, "UserService");

    assert_eq!(service.meta().extends.as_deref(), Some("BaseService"));
    assert_eq!(service.meta().implements, vec!["Disposable".to_string()]);

    let cache = child(service, "cache");
    assert_eq!(cache.kind, SymbolKind::Field);
    assert!(!cache.exported, "private members are not exported");
    assert_eq!(cache.meta().access_modifier, Some(AccessModifier::Private));

    assert!(child(service, "instances").meta().is_static);

    let repo = child(service, "repo");
    assert_eq!(repo.kind, SymbolKind::Field);
    assert!(!repo.exported);
    let name = child(service, "name");
    assert!(name.exported);

    let load = child(service, "load");
    assert_eq!(load.kind, SymbolKind::Method);
    assert!(load.meta().is_async);
    assert!(load.calls.iter().any(|c| c.target == "find" && c.receiver == "this.repo"));

    assert!(!child(service, "reset").exported);

    let handle = child(service, "handle");
    assert_eq!(handle.kind, SymbolKind::Method, "function-valued fields are methods");
    assert_eq!(handle.receiver, "UserService");
}

#[test]
fn test_abstract_class() {
    let code = r#"
export abstract class Shape {
    abstract area(): number;
    describe(): string { return "shape"; }
}
"#;
    let result = parse_typescript(code);
    let shape = symbol(&result, "Shape");

    assert!(shape.meta().is_abstract);
    assert!(child(shape, "area").meta().is_abstract);
    assert!(!child(shape, "describe").meta().is_abstract);
}

#[test]
fn test_function_overloads() {
    let code = r#"
export function parse(input: string): Node;
export function parse(input: Buffer): Node;
export function parse(input: string | Buffer): Node {
    return build(input);
}
"#;
    let result = parse_typescript(code);

    let parses: Vec<&Symbol> = result.symbols.iter().filter(|s| s.name == "parse").collect();
    assert_eq!(parses.len(), 3);
    assert_eq!(parses.iter().filter(|s| s.meta().is_overload).count(), 2);
    assert!(parses.iter().all(|s| s.exported));

    let ids: std::collections::HashSet<&str> = parses.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 3, "overloads get distinct IDs");
}

#[test]
fn test_export_clause_marks_local_declarations() {
    let code = r#"
function helper() {}
class Widget {}
const internal = 1;
export { helper, Widget as Component };
"#;
    let result = parse_typescript(code);

    assert!(symbol(&result, "helper").exported);
    assert!(symbol(&result, "Widget").exported);
    assert!(!symbol(&result, "internal").exported);
}

#[test]
fn test_export_default_identifier() {
    let code = "class App {}\nexport default App;\n";
    let result = parse_typescript(code);
    assert!(symbol(&result, "App").exported);
}

#[test]
fn test_imports() {
    let code = r#"
import React, { useState, useEffect as effect } from "react";
import * as path from "path";
import type { Config } from "./config";
import "./polyfills";
"#;
    let result = parse_typescript(code);

    let react = result.imports.iter().find(|i| i.path == "react").unwrap();
    assert_eq!(react.alias, "React");
    assert!(react.is_default);
    assert_eq!(
        react.names,
        vec!["useState".to_string(), "useEffect as effect".to_string()]
    );

    let path = result.imports.iter().find(|i| i.path == "path").unwrap();
    assert!(path.is_namespace);
    assert_eq!(path.alias, "path");

    let config = result.imports.iter().find(|i| i.path == "./config").unwrap();
    assert!(config.is_type_only);
    assert!(config.is_relative);

    let polyfills = result.imports.iter().find(|i| i.path == "./polyfills").unwrap();
    assert!(polyfills.is_module);
}

#[test]
fn test_re_exports_are_imports() {
    let code = r#"
export { Button, Card as Panel } from "./components";
export * from "./utils";
export * as icons from "./icons";
"#;
    let result = parse_typescript(code);

    assert!(result.symbols.is_empty());
    let components = result.imports.iter().find(|i| i.path == "./components").unwrap();
    assert_eq!(
        components.names,
        vec!["Button".to_string(), "Card as Panel".to_string()]
    );
    assert!(result.imports.iter().find(|i| i.path == "./utils").unwrap().is_wildcard);
    let icons = result.imports.iter().find(|i| i.path == "./icons").unwrap();
    assert!(icons.is_namespace);
    assert_eq!(icons.alias, "icons");
}

#[test]
fn test_import_require_and_dynamic_import() {
    let code = r#"
import fs = require("fs");

export async function loadPlugin(name: string) {
    const plugin = await import("./plugins/core");
    return plugin;
}
"#;
    let result = parse_typescript(code);

    let fs = result.imports.iter().find(|i| i.path == "fs").unwrap();
    assert!(fs.is_common_js);
    assert_eq!(fs.alias, "fs");

    let plugin = result.imports.iter().find(|i| i.path == "./plugins/core").unwrap();
    assert!(plugin.is_dynamic);
    assert!(plugin.is_module);
}

#[test]
fn test_type_alias_and_enum() {
    let code = r#"
export type Handler<T> = (event: T) => Promise<Result>;

export enum Direction {
    Up = "UP",
    Down = "DOWN",
}
"#;
    let result = parse_typescript(code);

    let handler = symbol(&result, "Handler");
    assert_eq!(handler.kind, SymbolKind::TypeAlias);
    assert_eq!(handler.meta().type_params, vec!["T".to_string()]);
    assert!(handler.type_references.iter().any(|r| r.name == "Result"));

    let direction = symbol(&result, "Direction");
    assert_eq!(direction.kind, SymbolKind::Enum);
    let members: Vec<&str> = direction.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(members, vec!["Up", "Down"]);
    assert!(direction
        .children
        .iter()
        .all(|c| c.kind == SymbolKind::EnumMember && c.receiver == "Direction"));
}

#[test]
fn test_interface_extends_and_methods() {
    let code = r#"
export interface Repository<T> extends Reader<T>, Writer<T> {
    find(id: string): Promise<T>;
    readonly size: number;
}
"#;
    let result = parse_typescript(code);
    let repository = symbol(&result, "Repository");

    assert_eq!(repository.meta().extends.as_deref(), Some("Reader"));
    assert_eq!(repository.meta().implements, vec!["Writer".to_string()]);
    assert_eq!(repository.meta().type_params, vec!["T".to_string()]);
    assert_eq!(child(repository, "find").kind, SymbolKind::Method);
    assert_eq!(child(repository, "size").kind, SymbolKind::Field);
}

#[test]
fn test_namespace_contents() {
    let code = r#"
export namespace Geometry {
    export function area(r: number): number { return r * r; }
    const scale = 2;
}
"#;
    let result = parse_typescript(code);

    let geometry = symbol(&result, "Geometry");
    assert_eq!(geometry.kind, SymbolKind::Module);
    assert!(geometry.exported);
    let area = child(geometry, "area");
    assert!(area.exported);
    assert!(!child(geometry, "scale").exported);
}

#[test]
fn test_arrow_function_constants() {
    let code = r#"
export const fetchUser = async (id: string): Promise<User> => api.get(id);
export const MAX_USERS = 100;
"#;
    let result = parse_typescript(code);

    let fetch_user = symbol(&result, "fetchUser");
    assert_eq!(fetch_user.kind, SymbolKind::Function);
    assert!(fetch_user.meta().is_async);
    assert!(fetch_user.calls.iter().any(|c| c.target == "get" && c.receiver == "api"));

    assert_eq!(symbol(&result, "MAX_USERS").kind, SymbolKind::Constant);
}

#[test]
fn test_non_exported_dropped_without_private() {
    let code = r#"
function internal() {}
export function api() {}
export class Store {
    private secret = 1;
    shared = 2;
}
"#;
    let front_end = TypeScriptFrontEnd::new(public_only());
    let result = parse_with(&front_end, "src/store.ts", code);

    let names: Vec<&str> = result.all_symbols().iter().map(|s| s.name.as_str()).collect();
    assert!(!names.contains(&"internal"));
    assert!(!names.contains(&"secret"));
    assert!(names.contains(&"api"));
    assert!(names.contains(&"shared"));
}

#[test]
fn test_tsx_component() {
    let code = r#"
export function Greeting({ name }: Props) {
    return <div className="greeting">{format(name)}</div>;
}
"#;
    let result = parse_with(&TypeScriptFrontEnd::default(), "src/Greeting.tsx", code);

    assert!(result.errors.is_empty(), "tsx dialect parses JSX: {:?}", result.errors);
    let greeting = symbol(&result, "Greeting");
    assert!(greeting.calls.iter().any(|c| c.target == "format"));
}

#[test]
fn test_callback_arguments_keep_member_paths() {
    let code = r#"
export class Server {
    start(app: Express) {
        app.use(logger, this.handle, null, undefined, true, 'x', 1);
    }
}
"#;
    let result = parse_typescript(code);

    let start = child(symbol(&result, "Server"), "start");
    let call = start.calls.iter().find(|c| c.target == "use").expect("use call");
    assert_eq!(call.receiver, "app");
    assert_eq!(
        call.function_args,
        vec!["logger".to_string(), "this.handle".to_string()]
    );
}

#[test]
fn test_type_references_keep_leaf_and_repeat_per_annotation() {
    let code = r#"
export function open(account: ns.Account): Promise<Ledger> {
    return load(account);
}

export function index(byId: Map<string, User>, list: User[]): void {}
"#;
    let result = parse_typescript(code);

    let names = |name: &str| -> Vec<String> {
        symbol(&result, name)
            .type_references
            .iter()
            .map(|r| r.name.clone())
            .collect()
    };
    assert_eq!(names("open"), vec!["Account".to_string(), "Ledger".to_string()]);
    assert_eq!(
        names("index"),
        vec!["User".to_string(), "User".to_string()],
        "duplicates are dropped within an annotation, not across annotations"
    );
}
