use super::*;

#[test]
fn test_constructor_function_with_prototype_method() {
    let code = "function Router(){ this.stack=[]; } Router.prototype.handle=function handle(req,res){};";
    let result = parse_javascript(code);

    let router = symbol(&result, "Router");
    assert_eq!(router.kind, SymbolKind::Class);
    assert!(router.meta().is_constructor);

    let handle = child(router, "handle");
    assert_eq!(handle.kind, SymbolKind::Method);
    assert_eq!(handle.receiver, "Router");

    let stack = child(router, "stack");
    assert_eq!(stack.kind, SymbolKind::Field);
    assert!(
        !result.symbols.iter().any(|s| s.name == "handle"),
        "the method moved under its constructor"
    );
}

#[test]
fn test_module_exports_alias_synthesizes_class() {
    let code = "var app = module.exports = {}; app.init = function init(){};";
    let result = parse_javascript_at("lib/application.js", code);

    let application = symbol(&result, "Application");
    assert_eq!(application.kind, SymbolKind::Class);
    assert!(application.exported);
    assert_eq!(application.children.len(), 1);

    let init = &application.children[0];
    assert_eq!(init.name, "init");
    assert_eq!(init.kind, SymbolKind::Method);
    assert_eq!(init.receiver, "Application");
}

#[test]
fn test_alias_with_declared_constructor_is_not_synthesized() {
    let code = r#"
function Server() { this.port = 80; }
var server = module.exports = Server;
Server.prototype.listen = function () {};
"#;
    let result = parse_javascript_at("lib/server.js", code);

    assert_eq!(names_of_kind(&result, SymbolKind::Class), vec!["Server".to_string()]);
    assert!(child(symbol(&result, "Server"), "listen").exported);
}

#[test]
fn test_lowercase_function_is_not_promoted() {
    let code = "function setup() { this.ready = true; }";
    let result = parse_javascript(code);

    let setup = symbol(&result, "setup");
    assert_eq!(setup.kind, SymbolKind::Function);
    assert!(setup.children.is_empty());
}

#[test]
fn test_require_bindings() {
    let code = r#"
const express = require("express");
const { join, resolve: resolvePath } = require("path");
const local = require("./local");
"#;
    let result = parse_javascript(code);

    assert!(result.symbols.is_empty(), "require bindings are imports only");

    let express = result.imports.iter().find(|i| i.path == "express").unwrap();
    assert!(express.is_common_js);
    assert!(express.is_module);
    assert_eq!(express.alias, "express");

    let path = result.imports.iter().find(|i| i.path == "path").unwrap();
    assert_eq!(
        path.names,
        vec!["join".to_string(), "resolve as resolvePath".to_string()]
    );

    assert!(result.imports.iter().find(|i| i.path == "./local").unwrap().is_relative);
}

#[test]
fn test_nested_require_and_dynamic_import() {
    let code = r#"
function load(name) {
    const driver = require("./drivers/" + name);
    const json = require("./config.json");
    return import("./lazy");
}
"#;
    let result = parse_javascript(code);

    let paths: Vec<&str> = result.imports.iter().map(|i| i.path.as_str()).collect();
    assert!(paths.contains(&"./config.json"));
    assert!(!paths.iter().any(|p| p.starts_with("./drivers")), "computed paths are skipped");

    let lazy = result.imports.iter().find(|i| i.path == "./lazy").unwrap();
    assert!(lazy.is_dynamic);
    assert!(!lazy.is_common_js);
}

#[test]
fn test_named_commonjs_exports() {
    let code = r#"
exports.parse = function (input) { return tokenize(input); };
exports.VERSION = "1.0.0";
module.exports.format = function format(value) {};
function helper() {}
exports.helper = helper;
"#;
    let result = parse_javascript(code);

    let parse = symbol(&result, "parse");
    assert_eq!(parse.kind, SymbolKind::Function);
    assert!(parse.exported);
    assert!(parse.calls.iter().any(|c| c.target == "tokenize"));

    let version = symbol(&result, "VERSION");
    assert_eq!(version.kind, SymbolKind::Constant);
    assert!(version.exported);

    assert!(symbol(&result, "format").exported);
    assert!(symbol(&result, "helper").exported, "exported by identifier");
}

#[test]
fn test_module_exports_object_marks_names() {
    let code = r#"
function create() {}
function destroy() {}
function internal() {}
module.exports = { create, remove: destroy };
"#;
    let result = parse_javascript(code);

    assert!(symbol(&result, "create").exported);
    assert!(symbol(&result, "destroy").exported);
    assert!(!symbol(&result, "internal").exported);
}

#[test]
fn test_module_exports_anonymous_class_named_after_file() {
    let code = "module.exports = class { run() {} };";
    let result = parse_javascript_at("src/task-runner.js", code);

    let runner = symbol(&result, "TaskRunner");
    assert_eq!(runner.kind, SymbolKind::Class);
    assert!(runner.exported);
    assert_eq!(child(runner, "run").kind, SymbolKind::Method);
}

#[test]
fn test_prototype_object_literal() {
    let code = r#"
function Queue() { this.items = []; }
Queue.prototype = {
    push: function (item) { this.items.push(item); },
    "pop": function () { return this.items.pop(); },
    size() { return this.items.length; },
    limit: 10
};
"#;
    let result = parse_javascript(code);

    let queue = symbol(&result, "Queue");
    for name in ["push", "pop", "size"] {
        let method = child(queue, name);
        assert_eq!(method.kind, SymbolKind::Method);
        assert_eq!(method.receiver, "Queue");
    }
    assert!(queue.child("limit").is_none(), "non-function values are not members");
}

#[test]
fn test_static_assignment_on_constructor() {
    let code = r#"
function Pool() { this.size = 0; }
Pool.create = function () { return new Pool(); };
"#;
    let result = parse_javascript(code);

    let create = child(symbol(&result, "Pool"), "create");
    assert!(create.meta().is_static);
    assert!(create.calls.iter().any(|c| c.target == "Pool"));
}

#[test]
fn test_inheritance_links() {
    let code = r#"
var util = require("util");

function Animal() { this.legs = 4; }
function Dog() { this.sound = "woof"; }
util.inherits(Dog, Animal);

function Cat() { this.lives = 9; }
Cat.prototype = Object.create(Animal.prototype);
"#;
    let result = parse_javascript(code);

    assert_eq!(symbol(&result, "Dog").meta().extends.as_deref(), Some("Animal"));
    assert_eq!(symbol(&result, "Cat").meta().extends.as_deref(), Some("Animal"));
    assert_eq!(symbol(&result, "Animal").meta().extends, None);
}

#[test]
fn test_last_inheritance_link_wins() {
    let code = r#"
function Base() { this.a = 1; }
function Other() { this.b = 2; }
function Derived() { this.c = 3; }
inherits(Derived, Base);
inherits(Derived, Other);
"#;
    let result = parse_javascript(code);

    assert_eq!(symbol(&result, "Derived").meta().extends.as_deref(), Some("Other"));
}

#[test]
fn test_es_module_syntax() {
    let code = r#"
import { EventEmitter } from "events";

export default class Bus extends EventEmitter {
    #listeners = 0;
    emit(name) { return super.emit(name); }
}

export const connect = (url) => new Bus(url);
"#;
    let result = parse_javascript(code);

    let bus = symbol(&result, "Bus");
    assert!(bus.exported);
    assert_eq!(bus.meta().extends.as_deref(), Some("EventEmitter"));
    assert!(!child(bus, "#listeners").exported, "#private fields are not exported");

    let connect = symbol(&result, "connect");
    assert_eq!(connect.kind, SymbolKind::Function);
    assert!(connect.calls.iter().any(|c| c.target == "Bus"));

    let events = result.imports.iter().find(|i| i.path == "events").unwrap();
    assert_eq!(events.names, vec!["EventEmitter".to_string()]);
}

#[test]
fn test_jsx_file() {
    let code = r#"
export function App() {
    return <Layout title="home">{render()}</Layout>;
}
"#;
    let result = parse_javascript_at("src/App.jsx", code);

    assert!(result.errors.is_empty(), "jsx parses cleanly: {:?}", result.errors);
    assert!(symbol(&result, "App").calls.iter().any(|c| c.target == "render"));
}

#[test]
fn test_assign_and_mixin_links() {
    let code = r#"
var events = require("events");

function Stream() { this.readable = true; }
Object.assign(Stream.prototype, events.EventEmitter.prototype);

function Socket() { this.open = false; }
mixin(Socket, Stream);
"#;
    let result = parse_javascript(code);

    assert_eq!(symbol(&result, "Stream").meta().extends.as_deref(), Some("EventEmitter"));
    assert_eq!(symbol(&result, "Socket").meta().extends.as_deref(), Some("Stream"));
}

#[test]
fn test_mixin_on_export_alias_extends_synthesized_class() {
    let code = r#"
var app = module.exports = {};
mixin(app, EventEmitter.prototype, false);
app.init = function init() {};
"#;
    let result = parse_javascript_at("lib/application.js", code);

    let application = symbol(&result, "Application");
    assert_eq!(application.kind, SymbolKind::Class);
    assert_eq!(application.meta().extends.as_deref(), Some("EventEmitter"));
    assert_eq!(child(application, "init").receiver, "Application");
}

#[test]
fn test_helper_function_does_not_collect_methods() {
    let code = "function noop() {}\nnoop.x = function () {};\n";
    let result = parse_javascript(code);

    let noop = symbol(&result, "noop");
    assert_eq!(noop.kind, SymbolKind::Function);
    assert!(noop.children.is_empty());
    let x = symbol(&result, "x");
    assert_eq!(x.kind, SymbolKind::Method);
    assert_eq!(x.receiver, "noop");
}
